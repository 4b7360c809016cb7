use chrono::{Datelike, FixedOffset, Months, NaiveDate, NaiveTime};

use super::{lexer::Token, Temporal};

const MONTHS: [&str; 12] = [
  "january",
  "february",
  "march",
  "april",
  "may",
  "june",
  "july",
  "august",
  "september",
  "october",
  "november",
  "december",
];

/// The month named by a word, by its full name or its three-letter abbreviation.
fn month(word: &str) -> Option<u32> {
  let word = word.to_lowercase();
  if word == "sept" {
    return Some(9);
  }
  let index = MONTHS
    .iter()
    .position(|month| (*month == word) || (month.get(.. 3) == Some(word.as_str())))?;
  // There's only twelve months
  u32::try_from(index + 1).ok()
}

/// If a word denotes the afternoon (`true`) or the morning (`false`).
fn meridiem(word: &str) -> Option<bool> {
  if word.eq_ignore_ascii_case("am") || word.eq_ignore_ascii_case("a") {
    Some(false)
  } else if word.eq_ignore_ascii_case("pm") || word.eq_ignore_ascii_case("p") {
    Some(true)
  } else {
    None
  }
}

fn ordinal(word: &str) -> bool {
  ["st", "nd", "rd", "th"].iter().any(|suffix| word.eq_ignore_ascii_case(suffix))
}

fn utc(word: &str) -> bool {
  ["z", "utc", "gmt"].iter().any(|name| word.eq_ignore_ascii_case(name))
}

/// The digits of a fraction of a second, as nanoseconds.
///
/// Digits beyond nanosecond precision are truncated.
fn nanoseconds(digits: &str) -> Option<u32> {
  let digits = digits.get(.. digits.len().min(9))?;
  let scale = 10u32.pow(u32::try_from(9 - digits.len()).ok()?);
  Some(digits.parse::<u32>().ok()? * scale)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Role {
  Year,
  Month,
  Day,
}

/// A number which is a year, month, or day.
#[derive(Clone, Copy, Debug)]
struct Ymd {
  value: u32,
  /// The amount of digits this was written with, used to distinguish `03` from `2003`.
  digits: usize,
  /// The role of this number, if it was unambiguous.
  role: Option<Role>,
}

struct Parser<'tokens, 'raw> {
  tokens: &'tokens [Token<'raw>],
  i: usize,
  ymd: Vec<Ymd>,
  hour: Option<u32>,
  minute: Option<u32>,
  second: Option<u32>,
  nanosecond: Option<u32>,
  meridiem: bool,
  offset: Option<i32>,
}

impl<'raw> Parser<'_, 'raw> {
  fn peek(&self, offset: usize) -> Option<Token<'raw>> {
    self.tokens.get(self.i + offset).copied()
  }

  fn previous(&self) -> Option<Token<'raw>> {
    self.tokens.get(self.i.checked_sub(1)?).copied()
  }

  fn push(&mut self, ymd: Ymd) -> Option<()> {
    self.ymd.push(ymd);
    // A date only has three components
    (self.ymd.len() <= 3).then_some(())
  }

  /// Push a number, which is presumed a year if it has more than two digits.
  fn push_number(&mut self, digits: &str) -> Option<()> {
    if digits.len() > 4 {
      None?;
    }
    let value = digits.parse().ok()?;
    let role = (digits.len() > 2).then_some(Role::Year);
    self.push(Ymd { value, digits: digits.len(), role })
  }

  fn push_month(&mut self, word: &str) -> Option<()> {
    let value = month(word)?;
    self.push(Ymd { value, digits: 2, role: Some(Role::Month) })
  }

  fn set_meridiem(&mut self, pm: bool) {
    self.meridiem = true;
    if let Some(hour) = self.hour {
      if (1 ..= 12).contains(&hour) {
        self.hour = Some(match (pm, hour) {
          (false, 12) => 0,
          (true, 1 ..= 11) => hour + 12,
          _ => hour,
        });
      }
    }
  }

  /// Read `hhmm` or `hhmmss`.
  fn clock(&mut self, digits: &str) -> Option<()> {
    self.hour = Some(digits.get(0 .. 2)?.parse().ok()?);
    self.minute = Some(digits.get(2 .. 4)?.parse().ok()?);
    if let Some(second) = digits.get(4 .. 6) {
      self.second = Some(second.parse().ok()?);
    }
    Some(())
  }

  /// Read `hh:mm[:ss[.fraction]]`, positioned at the hour.
  fn time(&mut self, hour: &str, minute: &str) -> Option<()> {
    self.hour = Some(hour.parse().ok()?);
    self.minute = Some(minute.parse().ok()?);
    self.i += 3;

    if self.peek(0) != Some(Token::Punct(':')) {
      return Some(());
    }
    let Some(Token::Number(second)) = self.peek(1) else { return Some(()) };
    if second.len() > 2 {
      return Some(());
    }
    self.second = Some(second.parse().ok()?);
    self.i += 2;

    if self.peek(0) == Some(Token::Punct('.')) {
      if let Some(Token::Number(fraction)) = self.peek(1) {
        self.nanosecond = Some(nanoseconds(fraction)?);
        self.i += 2;
      }
    }
    Some(())
  }

  /// Read a packed `YYMMDD`, `YYYYMMDD`, `YYYYMMDDhhmm`, or `YYYYMMDDhhmmss`.
  fn packed(&mut self, digits: &str) -> Option<()> {
    let year_digits = if digits.len() == 6 { 2 } else { 4 };
    let year = digits.get(.. year_digits)?;
    let rest = digits.get(year_digits ..)?;
    self.push(Ymd { value: year.parse().ok()?, digits: year_digits, role: Some(Role::Year) })?;
    self.push(Ymd { value: rest.get(0 .. 2)?.parse().ok()?, digits: 2, role: Some(Role::Month) })?;
    self.push(Ymd { value: rest.get(2 .. 4)?.parse().ok()?, digits: 2, role: Some(Role::Day) })?;

    let time = rest.get(4 ..)?;
    if !time.is_empty() {
      if self.hour.is_some() {
        None?;
      }
      self.clock(time)?;
    }
    Some(())
  }

  /// Read a date whose components are separated by `-`, `/`, or `.`.
  fn separated(&mut self, separator: char) -> Option<()> {
    for component in 0 .. 3 {
      if component != 0 {
        let continues = (self.peek(0) == Some(Token::Punct(separator))) &&
          self.peek(1).is_some_and(date_component);
        if !continues {
          break;
        }
        self.i += 1;
      }
      match self.peek(0)? {
        Token::Number(digits) => self.push_number(digits)?,
        Token::Word(word) => self.push_month(word)?,
        Token::Punct(_) => None?,
      }
      self.i += 1;
    }
    Some(())
  }

  fn number(&mut self, digits: &'raw str) -> Option<()> {
    let len = digits.len();
    let next = self.peek(1);

    if self.hour.is_none() && (len <= 2) && (next == Some(Token::Punct(':'))) {
      if let Some(Token::Number(minute)) = self.peek(2) {
        if minute.len() <= 2 {
          return self.time(digits, minute);
        }
      }
    }

    // The time following a `T`, as in `20230105T1020`
    if self.hour.is_none() &&
      (!self.ymd.is_empty()) &&
      matches!(len, 4 | 6) &&
      matches!(self.previous(), Some(Token::Word("T" | "t")))
    {
      self.i += 1;
      return self.clock(digits);
    }

    if self.ymd.is_empty() && matches!(len, 6 | 8 | 12 | 14) {
      self.i += 1;
      return self.packed(digits);
    }

    if let Some(Token::Punct(separator @ ('-' | '/' | '.'))) = next {
      if self.peek(2).is_some_and(date_component) {
        return self.separated(separator);
      }
    }

    if let Some(Token::Word(word)) = next {
      if (len <= 2) && ordinal(word) {
        self.push(Ymd { value: digits.parse().ok()?, digits: len, role: Some(Role::Day) })?;
        self.i += 2;
        return Some(());
      }

      if let (Some(pm), true) = (meridiem(word), len <= 2) {
        let hour = digits.parse().ok()?;
        if self.hour.is_none() && (1 ..= 12).contains(&hour) {
          self.hour = Some(hour);
          self.set_meridiem(pm);
          self.i += 2;
          return Some(());
        }
      }
    }

    self.i += 1;
    // Too long to be any component
    if len > 4 {
      return Some(());
    }
    self.push_number(digits)
  }

  fn word(&mut self, word: &str) -> Option<()> {
    self.i += 1;
    if month(word).is_some() {
      return self.push_month(word);
    }
    if let Some(pm) = meridiem(word) {
      if self.hour.is_some() && (!self.meridiem) {
        self.set_meridiem(pm);
      }
      return Some(());
    }
    if utc(word) && self.hour.is_some() && self.offset.is_none() {
      self.offset = Some(0);
    }
    // Any other word, such as the day of the week, is skipped
    Some(())
  }

  /// Read an offset such as `+0530`, `-05:30`, or `+05`.
  fn punct(&mut self, punct: char) -> Option<()> {
    if matches!(punct, '+' | '-') && self.hour.is_some() && self.offset.is_none() {
      if let Some(Token::Number(digits)) = self.peek(1) {
        let hm = match digits.len() {
          4 => Some((digits.get(0 .. 2)?, digits.get(2 .. 4)?, 2)),
          1 | 2 => match (self.peek(2), self.peek(3)) {
            (Some(Token::Punct(':')), Some(Token::Number(minutes))) if minutes.len() == 2 => {
              Some((digits, minutes, 4))
            }
            _ => Some((digits, "0", 2)),
          },
          _ => None,
        };
        if let Some((hours, minutes, tokens)) = hm {
          let hours = hours.parse::<i32>().ok()?;
          let minutes = minutes.parse::<i32>().ok()?;
          let sign = if punct == '-' { -1 } else { 1 };
          self.offset = Some(sign * ((hours * 3600) + (minutes * 60)));
          self.i += tokens;
          return Some(());
        }
      }
    }
    self.i += 1;
    Some(())
  }

  /// Assign the year, month, and day from the numbers read.
  fn resolve_ymd(&self) -> Option<(Option<Ymd>, Option<Ymd>, Option<Ymd>)> {
    let mut year = None;
    let mut month = None;
    let mut day = None;
    let mut rest = vec![];
    for ymd in &self.ymd {
      let slot = match ymd.role {
        Some(Role::Year) => &mut year,
        Some(Role::Month) => &mut month,
        Some(Role::Day) => &mut day,
        None => {
          rest.push(*ymd);
          continue;
        }
      };
      if slot.replace(*ymd).is_some() {
        None?;
      }
    }

    use Role::*;
    let roles: &[Role] = match *rest.as_slice() {
      [] => &[],
      [a] => {
        if a.value > 31 {
          &[Year]
        } else if month.is_some() {
          if day.is_none() {
            &[Day]
          } else {
            &[Year]
          }
        } else if year.is_some() {
          if day.is_some() || (a.value <= 12) {
            &[Month]
          } else {
            &[Day]
          }
        } else if day.is_none() {
          &[Day]
        } else {
          &[Month]
        }
      }
      [a, b] => {
        if month.is_some() {
          if a.value > 31 {
            &[Year, Day]
          } else {
            &[Day, Year]
          }
        } else if year.is_some() {
          if a.value > 12 {
            &[Day, Month]
          } else {
            &[Month, Day]
          }
        } else if day.is_some() {
          if a.value > 31 {
            &[Year, Month]
          } else {
            &[Month, Year]
          }
        } else if a.value > 31 {
          &[Year, Month]
        } else if b.value > 31 {
          &[Month, Year]
        } else if a.value > 12 {
          &[Day, Month]
        } else {
          &[Month, Day]
        }
      }
      [a, _, _] => {
        if a.value > 31 {
          &[Year, Month, Day]
        } else if a.value > 12 {
          &[Day, Month, Year]
        } else {
          &[Month, Day, Year]
        }
      }
      _ => None?,
    };

    for (ymd, role) in rest.iter().zip(roles) {
      let slot = match role {
        Year => &mut year,
        Month => &mut month,
        Day => &mut day,
      };
      if slot.replace(*ymd).is_some() {
        None?;
      }
    }
    Some((year, month, day))
  }

  fn resolve(self, reference: NaiveDate) -> Option<Temporal> {
    if self.ymd.is_empty() && self.hour.is_none() {
      None?;
    }

    let (year, month, day) = self.resolve_ymd()?;
    let year = match year {
      Some(Ymd { value, digits, .. }) if digits <= 2 => century(value, reference.year())?,
      Some(Ymd { value, .. }) => i32::try_from(value).ok()?,
      None => reference.year(),
    };
    let month = month.map_or(reference.month(), |month| month.value);
    if !(1 ..= 12).contains(&month) {
      None?;
    }
    let day = match day {
      Some(day) => day.value,
      None => {
        let last = NaiveDate::from_ymd_opt(year, month, 1)?
          .checked_add_months(Months::new(1))?
          .pred_opt()?
          .day();
        reference.day().min(last)
      }
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let Some(hour) = self.hour else { return Some(Temporal::Date(date)) };
    let time = NaiveTime::from_hms_nano_opt(
      hour,
      self.minute.unwrap_or(0),
      self.second.unwrap_or(0),
      self.nanosecond.unwrap_or(0),
    )?;
    let date_time = date.and_time(time);
    match self.offset {
      Some(offset) => {
        let offset = FixedOffset::east_opt(offset)?;
        date_time.and_local_timezone(offset).single().map(Temporal::Offset)
      }
      None => Some(Temporal::DateTime(date_time)),
    }
  }
}

/// If a token may be a component of a separated date.
fn date_component(token: Token<'_>) -> bool {
  match token {
    Token::Number(_) => true,
    Token::Word(word) => month(word).is_some(),
    Token::Punct(_) => false,
  }
}

/// Expand a two-digit year to the year within 50 years of the reference year.
fn century(year: u32, reference: i32) -> Option<i32> {
  let mut year = (reference - reference.rem_euclid(100)) + i32::try_from(year).ok()?;
  if year >= (reference + 50) {
    year -= 100;
  } else if year < (reference - 50) {
    year += 100;
  }
  Some(year)
}

/// Parse the date or date-time within a series of tokens.
///
/// Unrecognized tokens are skipped. Components missing are taken from the reference date, with
/// the day clamped to the length of the month.
pub(super) fn parse(tokens: &[Token<'_>], reference: NaiveDate) -> Option<Temporal> {
  let mut parser = Parser {
    tokens,
    i: 0,
    ymd: vec![],
    hour: None,
    minute: None,
    second: None,
    nanosecond: None,
    meridiem: false,
    offset: None,
  };
  while let Some(token) = parser.peek(0) {
    match token {
      Token::Number(digits) => parser.number(digits)?,
      Token::Word(word) => parser.word(word)?,
      Token::Punct(punct) => parser.punct(punct)?,
    }
  }
  parser.resolve(reference)
}

#[test]
fn test_century() {
  assert_eq!(century(3, 2024), Some(2003));
  assert_eq!(century(73, 2024), Some(2073));
  assert_eq!(century(74, 2024), Some(1974));
  assert_eq!(century(10, 2080), Some(2110));
}

#[test]
fn test_month() {
  assert_eq!(month("Jan"), Some(1));
  assert_eq!(month("MAY"), Some(5));
  assert_eq!(month("Sept"), Some(9));
  assert_eq!(month("september"), Some(9));
  assert_eq!(month("marc"), None);
  assert_eq!(month("ma"), None);
}
