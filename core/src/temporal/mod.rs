use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

mod lexer;
mod parser;

/// A calendar date or date-time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Temporal {
  /// A calendar date, without a time.
  Date(NaiveDate),
  /// A date-time, without an offset.
  DateTime(NaiveDateTime),
  /// A date-time with an offset from UTC.
  Offset(DateTime<FixedOffset>),
}

impl Temporal {
  /// The calendar date of this value, as written (without any conversion to UTC).
  pub fn date(&self) -> NaiveDate {
    match self {
      Temporal::Date(date) => *date,
      Temporal::DateTime(date_time) => date_time.date(),
      Temporal::Offset(date_time) => date_time.date_naive(),
    }
  }

  /// The date-time of this value, as written (without any conversion to UTC).
  ///
  /// Dates are considered to be at midnight.
  pub fn naive(&self) -> NaiveDateTime {
    match self {
      Temporal::Date(date) => date.and_time(NaiveTime::MIN),
      Temporal::DateTime(date_time) => *date_time,
      Temporal::Offset(date_time) => date_time.naive_local(),
    }
  }

  /// If this value's time, if it has one, is midnight.
  pub fn is_midnight(&self) -> bool {
    self.naive().time() == NaiveTime::MIN
  }

  /// The canonical ISO-8601 representation of this value.
  ///
  /// Dates are rendered as `YYYY-MM-DD`. Date-times are rendered as `YYYY-MM-DDThh:mm:ss`, with
  /// the fraction of the second only present if non-zero (with as many digits as necessary out of
  /// 3, 6, or 9), followed by the offset (`±hh:mm`) if there is one.
  pub fn to_iso8601(&self) -> String {
    match self {
      Temporal::Date(date) => date.format("%Y-%m-%d").to_string(),
      Temporal::DateTime(date_time) => date_time.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
      Temporal::Offset(date_time) => date_time.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
    }
  }
}

impl core::fmt::Display for Temporal {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(&self.to_iso8601())
  }
}

impl From<NaiveDate> for Temporal {
  fn from(date: NaiveDate) -> Self {
    Temporal::Date(date)
  }
}

impl From<NaiveDateTime> for Temporal {
  fn from(date_time: NaiveDateTime) -> Self {
    Temporal::DateTime(date_time)
  }
}

impl From<DateTime<FixedOffset>> for Temporal {
  fn from(date_time: DateTime<FixedOffset>) -> Self {
    Temporal::Offset(date_time)
  }
}

/// A tolerant parser for dates and date-times embedded within strings.
///
/// This recognizes ISO-8601 and common locale formats, skipping any words it doesn't recognize.
/// Components missing from the string (such as the year in `"March 5"`) are taken from the
/// reference date. Names of weekdays are skipped as well, so a weekday alone (`"Mon"`) isn't
/// inferred to be anything, not even the reference date.
///
/// This is best-effort and will yield false positives. Any string with a number which could be a
/// day, month, or year will be inferred to be a date, such as `"1234"` or `"room 12"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Inference {
  reference: NaiveDate,
}

impl Inference {
  /// Create a parser which fills in missing components from the specified date.
  pub fn new(reference: NaiveDate) -> Self {
    Self { reference }
  }

  /// Create a parser which fills in missing components from today's (local) date.
  pub fn today() -> Self {
    Self::new(chrono::Local::now().date_naive())
  }

  /// The date missing components are filled in from.
  pub fn reference(&self) -> NaiveDate {
    self.reference
  }

  /// Infer the date or date-time within a string.
  ///
  /// Returns `None` if the string doesn't contain a recognizable date or time, or if it contains
  /// an impossible one (such as the 30th of February).
  pub fn infer(&self, raw: &str) -> Option<Temporal> {
    // Attempt the canonical forms first, as they're expected to be the most common
    if let Some(temporal) = strict(raw.trim()) {
      return Some(temporal);
    }
    parser::parse(&lexer::tokenize(raw), self.reference)
  }
}

impl Default for Inference {
  fn default() -> Self {
    Self::today()
  }
}

/// Infer the date or date-time within a string, filling in missing components from today's date.
///
/// Please see [`Inference`] for more information.
pub fn infer(raw: &str) -> Option<Temporal> {
  Inference::today().infer(raw)
}

/// Parse the canonical ISO-8601 forms.
fn strict(raw: &str) -> Option<Temporal> {
  // A date is exactly ten bytes, and anything shorter can't be any of the forms here
  if raw.len() < 10 {
    return None;
  }
  if raw.len() == 10 {
    return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Temporal::Date);
  }
  if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
    return Some(Temporal::Offset(date_time));
  }
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
    .into_iter()
    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    .map(Temporal::DateTime)
}
