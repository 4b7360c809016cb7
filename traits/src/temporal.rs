use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::{mismatch, BindOptions, JsonError, Temporal, Value, JsonDeserialize, JsonSerialize};

/*
  Temporal values are encoded as their canonical ISO-8601 string. When binding, both temporal
  values and strings are accepted, the latter being inferred. This allows typed temporal fields to
  be bound even if inference was disabled when decoding.
*/

fn temporal(value: &Value, expected: &'static str) -> Result<Temporal, JsonError> {
  match value {
    Value::Temporal { value, .. } => Ok(*value),
    Value::String(string) => date_json::infer(string).ok_or_else(|| mismatch(expected, value)),
    _ => Err(mismatch(expected, value)),
  }
}

impl JsonSerialize for Temporal {
  fn serialize(&self) -> Result<Value, JsonError> {
    Ok(Value::String(self.to_iso8601()))
  }
}
impl JsonDeserialize for Temporal {
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    temporal(&value, "date or date-time")
  }
}

impl JsonSerialize for NaiveDate {
  fn serialize(&self) -> Result<Value, JsonError> {
    Temporal::Date(*self).serialize()
  }
}
impl JsonDeserialize for NaiveDate {
  /// Date-times are accepted if they're at midnight.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    match temporal(&value, "date")? {
      Temporal::Date(date) => Ok(date),
      temporal if temporal.is_midnight() => Ok(temporal.date()),
      _ => Err(mismatch("date", &value)),
    }
  }
}

impl JsonSerialize for NaiveDateTime {
  fn serialize(&self) -> Result<Value, JsonError> {
    Temporal::DateTime(*self).serialize()
  }
}
impl JsonDeserialize for NaiveDateTime {
  /// Dates are accepted as midnight. Date-times with an offset are rejected.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    match temporal(&value, "date-time")? {
      temporal @ (Temporal::Date(_) | Temporal::DateTime(_)) => Ok(temporal.naive()),
      Temporal::Offset(_) => Err(mismatch("date-time", &value)),
    }
  }
}

impl JsonSerialize for DateTime<FixedOffset> {
  fn serialize(&self) -> Result<Value, JsonError> {
    Temporal::Offset(*self).serialize()
  }
}
impl JsonDeserialize for DateTime<FixedOffset> {
  /// Only date-times with an offset are accepted.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    match temporal(&value, "date-time with offset")? {
      Temporal::Offset(date_time) => Ok(date_time),
      _ => Err(mismatch("date-time with offset", &value)),
    }
  }
}

impl JsonSerialize for DateTime<Utc> {
  fn serialize(&self) -> Result<Value, JsonError> {
    self.fixed_offset().serialize()
  }
}
impl JsonDeserialize for DateTime<Utc> {
  /// Only date-times with an offset are accepted, which are converted to UTC.
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    DateTime::<FixedOffset>::deserialize(value, options)
      .map(|date_time| date_time.with_timezone(&Utc))
      .map_err(|e| match e {
        JsonError::TypeMismatch { found, .. } => {
          JsonError::TypeMismatch { expected: "UTC date-time", found }
        }
        e => e,
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inferred(source: &str) -> Value {
    Value::Temporal { value: date_json::infer(source).unwrap(), source: source.to_string() }
  }

  #[test]
  fn serialize_canonically() {
    let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
    assert_eq!(date.serialize().unwrap(), Value::from("2023-01-05"));
    let date_time = date.and_hms_micro_opt(10, 20, 30, 123_456).unwrap();
    assert_eq!(date_time.serialize().unwrap(), Value::from("2023-01-05T10:20:30.123456"));
    let utc = date_time.and_utc();
    assert_eq!(utc.serialize().unwrap(), Value::from("2023-01-05T10:20:30.123456+00:00"));
  }

  #[test]
  fn deserialize_leniently() {
    let options = BindOptions::default();
    let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();

    assert_eq!(NaiveDate::deserialize(inferred("2023-01-05"), &options).unwrap(), date);
    // Strings are inferred when bound
    assert_eq!(NaiveDate::deserialize(Value::from("January 5, 2023"), &options).unwrap(), date);
    assert_eq!(
      NaiveDate::deserialize(Value::from("2023-01-05T00:00:00"), &options).unwrap(),
      date
    );
    assert!(NaiveDate::deserialize(Value::from("2023-01-05T10:00:00"), &options).is_err());

    assert_eq!(
      NaiveDateTime::deserialize(inferred("2023-01-05"), &options).unwrap(),
      date.and_hms_opt(0, 0, 0).unwrap()
    );
    assert!(NaiveDateTime::deserialize(inferred("2023-01-05T10:00:00+01:00"), &options).is_err());

    let utc = DateTime::<Utc>::deserialize(inferred("2023-01-05T10:00:00+01:00"), &options);
    assert_eq!(utc.unwrap(), date.and_hms_opt(9, 0, 0).unwrap().and_utc());
    assert_eq!(
      DateTime::<Utc>::deserialize(Value::from(1i64), &options),
      Err(JsonError::TypeMismatch { expected: "UTC date-time", found: date_json::Type::Number })
    );

    assert_eq!(
      Temporal::deserialize(Value::from("not a date at all !!"), &options),
      Err(JsonError::TypeMismatch {
        expected: "date or date-time",
        found: date_json::Type::String
      })
    );
  }
}
