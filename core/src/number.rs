use crate::{io::Reader, Malformed, JsonError};

/// A RFC-8259 number.
///
/// Integers are kept exact when they fit within an `i64` (or, if positive, a `u64`). All other
/// numbers, including integers written with a fraction or exponent, are represented as an `f64`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Number {
  /// An integer within the range of an `i64`.
  Integer(i64),
  /// A positive integer exceeding `i64::MAX`.
  Unsigned(u64),
  /// A number with a fraction or exponent, or an integer exceeding the range of an `u64`.
  Float(f64),
}

impl Number {
  /// This number as an `i64`, if it's an integer within range.
  pub fn i64(&self) -> Option<i64> {
    match *self {
      Number::Integer(value) => Some(value),
      Number::Unsigned(value) => value.try_into().ok(),
      Number::Float(_) => None,
    }
  }

  /// This number as an `u64`, if it's a non-negative integer.
  pub fn u64(&self) -> Option<u64> {
    match *self {
      Number::Integer(value) => value.try_into().ok(),
      Number::Unsigned(value) => Some(value),
      Number::Float(_) => None,
    }
  }

  /// This number as an `f64`.
  ///
  /// Integers whose magnitude exceeds 2**53 are rounded to the nearest representable `f64`.
  #[allow(clippy::cast_precision_loss)]
  pub fn f64(&self) -> f64 {
    match *self {
      Number::Integer(value) => value as f64,
      Number::Unsigned(value) => value as f64,
      Number::Float(value) => value,
    }
  }
}

impl From<i64> for Number {
  fn from(value: i64) -> Self {
    Number::Integer(value)
  }
}

impl From<u64> for Number {
  fn from(value: u64) -> Self {
    match i64::try_from(value) {
      Ok(value) => Number::Integer(value),
      Err(_) => Number::Unsigned(value),
    }
  }
}

impl From<f64> for Number {
  fn from(value: f64) -> Self {
    Number::Float(value)
  }
}

/// Advance past a run of ASCII digits, returning how many were read.
#[inline(always)]
fn digits(reader: &mut Reader<'_>) -> usize {
  let mut count = 0;
  while reader.peek(0).is_ok_and(|byte| byte.is_ascii_digit()) {
    // `peek` succeeded so this won't be short
    let _ = reader.read_byte();
    count += 1;
  }
  count
}

/// Read a number from a JSON serialization.
/*
  The syntax we apply is (expanded)
  `[ minus ] int [ decimal-point 1*DIGIT ] [ e [ minus / plus ] 1*DIGIT ]`, where `int` is either
  `0` or a non-zero digit followed by any amount of digits.

  https://datatracker.ietf.org/doc/html/rfc8259#section-6 lets us specify the range, precision
  of numbers. We reject numbers which don't fit within a finite `f64`.
*/
pub(crate) fn read_number(reader: &mut Reader<'_>) -> Result<Number, JsonError> {
  let start = reader.position();
  let mut number = reader.clone();
  let invalid = JsonError::MalformedJson { position: start, reason: Malformed::InvalidNumber };

  if number.peek(0) == Ok(b'-') {
    number.read_byte()?;
  }

  match number.peek(0) {
    Ok(b'0') => {
      number.read_byte()?;
      // Leading zeroes aren't allowed
      if number.peek(0).is_ok_and(|byte| byte.is_ascii_digit()) {
        Err(invalid.clone())?;
      }
    }
    Ok(b'1' ..= b'9') => {
      digits(&mut number);
    }
    _ => Err(invalid.clone())?,
  }

  let mut integer = true;
  if number.peek(0) == Ok(b'.') {
    number.read_byte()?;
    if digits(&mut number) == 0 {
      Err(invalid.clone())?;
    }
    integer = false;
  }
  if matches!(number.peek(0), Ok(b'e' | b'E')) {
    number.read_byte()?;
    if matches!(number.peek(0), Ok(b'-' | b'+')) {
      number.read_byte()?;
    }
    if digits(&mut number) == 0 {
      Err(invalid.clone())?;
    }
    integer = false;
  }

  let len = number.position() - start;
  let str = core::str::from_utf8(reader.read_bytes(len)?).map_err(|_| invalid.clone())?;

  if integer {
    if let Ok(value) = str.parse::<i64>() {
      return Ok(Number::Integer(value));
    }
    if let Ok(value) = str.parse::<u64>() {
      return Ok(Number::Unsigned(value));
    }
  }

  // Numbers beyond the range of `f64` (such as `1e400`) are rejected rather than becoming
  // infinite, as infinity has no representation within JSON
  match str.parse::<f64>() {
    Ok(value) if value.is_finite() => Ok(Number::Float(value)),
    _ => Err(invalid),
  }
}

#[cfg(test)]
fn number(str: &str) -> Result<Number, JsonError> {
  read_number(&mut Reader::new(str.as_bytes()))
}

#[test]
fn test_read_number() {
  assert_eq!(number("0").unwrap(), Number::Integer(0));
  assert_eq!(number("-0").unwrap(), Number::Integer(0));
  assert_eq!(number("1234").unwrap(), Number::Integer(1234));
  assert_eq!(number("-9223372036854775808").unwrap(), Number::Integer(i64::MIN));
  assert_eq!(number("18446744073709551615").unwrap(), Number::Unsigned(u64::MAX));
  assert_eq!(number("123.45").unwrap(), Number::Float(123.45));
  assert_eq!(number("1e3").unwrap(), Number::Float(1000.0));
  assert_eq!(number("-2.5E-1").unwrap(), Number::Float(-0.25));
  assert!(matches!(number("18446744073709551616").unwrap(), Number::Float(_)));

  for invalid in ["01", "-", "1.", ".5", "1e", "1e+", "+1", "1e400"] {
    assert_eq!(
      number(invalid),
      Err(JsonError::MalformedJson { position: 0, reason: Malformed::InvalidNumber }),
      "{invalid}"
    );
  }
}

#[test]
fn test_number_stops_at_delimiter() {
  let mut reader = Reader::new(b"12,");
  assert_eq!(read_number(&mut reader).unwrap(), Number::Integer(12));
  assert_eq!(reader.position(), 2);
}

#[test]
fn test_number_conversions() {
  assert_eq!(Number::Integer(-1).u64(), None);
  assert_eq!(Number::Unsigned(u64::MAX).i64(), None);
  assert_eq!(Number::from(5u64), Number::Integer(5));
  assert_eq!(Number::Float(1.5).i64(), None);
  assert!((Number::Integer(3).f64() - 3.0).abs() < f64::EPSILON);
}
