use serde_json::Value;

/*
  Differential checks between `date-json` and `serde_json`. `serde_json` is considered the oracle,
  with every value decoded by `date-json` compared against the `serde_json::Value` for the same
  encoding, and every value rendered by `date-json` reparsed with `serde_json`.
*/

fn check_float(number: f64, expected: f64) {
  // 0.1% of the smaller number, or the smallest normal number for subnormals
  let allowed_deviation = (number.min(expected).abs() / 1000.0).max(f64::MIN_POSITIVE);
  assert!((number - expected).abs() <= allowed_deviation, "{number} != {expected}");
}

fn check_number(number: date_json::Number, expected: &serde_json::Number) {
  if let Some(expected) = expected.as_i64() {
    assert_eq!(number.i64(), Some(expected));
  } else if let Some(expected) = expected.as_u64() {
    assert_eq!(number.u64(), Some(expected));
  } else {
    check_float(number.f64(), expected.as_f64().unwrap());
  }
}

/// Check a value decoded by `date-json` is equivalent to the value decoded by `serde_json`.
///
/// Strings inferred to be temporal values are compared by the text they were inferred from.
pub fn check_value(value: &date_json::Value, expected: &Value) {
  match (value, expected) {
    (date_json::Value::Null, Value::Null) => {}
    (date_json::Value::Bool(value), Value::Bool(expected)) => assert_eq!(value, expected),
    (date_json::Value::Number(value), Value::Number(expected)) => check_number(*value, expected),
    (
      date_json::Value::String(value) | date_json::Value::Temporal { source: value, .. },
      Value::String(expected),
    ) => assert_eq!(value, expected),
    (date_json::Value::Array(values), Value::Array(expected)) => {
      assert_eq!(values.len(), expected.len());
      for (value, expected) in values.iter().zip(expected) {
        check_value(value, expected);
      }
    }
    (date_json::Value::Object(map), Value::Object(expected)) => {
      assert_eq!(map.len(), expected.len());
      // Both preserve the order of keys
      for ((key, value), (expected_key, expected)) in map.iter().zip(expected) {
        assert_eq!(key, expected_key);
        check_value(value, expected);
      }
    }
    (value, expected) => panic!("{:?} decoded as {:?}", expected, value.kind()),
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;
  use rand_core::{RngCore, OsRng};
  use date_json::{DecoderConfig, Deserializer, Indent, Temporal};
  use super::*;

  #[allow(clippy::cast_possible_truncation)]
  fn random_string() -> String {
    let mut res = String::new();
    for _ in 0 .. (OsRng.next_u64() % 128) {
      if (OsRng.next_u64() % 2) == 1 {
        // ASCII
        res.push(char::from_u32((OsRng.next_u64() % 128) as u32).unwrap());
      } else {
        // Unicode
        res.push(loop {
          if let Some(char) = char::from_u32(OsRng.next_u64() as u32) {
            // Skip ASCII as those are intended to be included by the other branch
            // Skip the byte-order mark as implementations are allowed to ignore/reject it
            if char.is_ascii() || (char == '\u{feff}') {
              continue;
            }
            break char;
          }
        });
      }
    }
    res
  }

  // A string which may be inferred to be a temporal value
  fn random_temporal_string() -> String {
    let year = 1900 + (OsRng.next_u64() % 200);
    let month = 1 + (OsRng.next_u64() % 12);
    let day = 1 + (OsRng.next_u64() % 28);
    match OsRng.next_u64() % 4 {
      0 => format!("{year:04}-{month:02}-{day:02}"),
      1 => {
        let micros = OsRng.next_u64() % 1_000_000;
        format!("{year:04}-{month:02}-{day:02}T10:20:30.{micros:06}")
      }
      2 => format!("{month}/{day}/{year}"),
      3 => format!("{year:04}-{month:02}-{day:02}T00:00:00+05:30"),
      _ => unreachable!(),
    }
  }

  fn random_value(depth: usize) -> Value {
    let modulus = if depth == 8 { 4 } else { 6 };
    match OsRng.next_u64() % modulus {
      0 => Value::Null,
      1 => Value::Bool((OsRng.next_u64() % 2) == 1),
      2 => Value::Number(match OsRng.next_u64() % 3 {
        0 => serde_json::Number::from(OsRng.next_u64()),
        #[allow(clippy::cast_possible_wrap)]
        1 => serde_json::Number::from(OsRng.next_u64() as i64),
        2 => loop {
          if let Some(float) = serde_json::Number::from_f64(f64::from_bits(OsRng.next_u64())) {
            break float;
          }
        },
        _ => unreachable!(),
      }),
      3 => Value::String(if (OsRng.next_u64() % 2) == 1 {
        random_string()
      } else {
        random_temporal_string()
      }),
      4 => Value::Array({
        let mut res = vec![];
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.push(random_value(depth + 1));
        }
        res
      }),
      5 => Value::Object({
        let mut res = serde_json::Map::new();
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.insert(random_string(), random_value(depth + 1));
        }
        res
      }),
      _ => unreachable!(),
    }
  }

  fn random_container() -> Value {
    loop {
      let value = random_value(0);
      if matches!(value, Value::Object(_) | Value::Array(_)) {
        break value;
      }
    }
  }

  fn has_temporal(value: &date_json::Value) -> bool {
    match value {
      date_json::Value::Temporal { .. } => true,
      date_json::Value::Array(values) => values.iter().any(has_temporal),
      date_json::Value::Object(map) => map.values().any(has_temporal),
      _ => false,
    }
  }

  // Every temporal value rendered must be canonical ISO-8601, as `serde_json` sees it
  fn check_temporals_rendered(value: &date_json::Value, rendered: &Value) {
    match (value, rendered) {
      (date_json::Value::Temporal { value, .. }, Value::String(rendered)) => {
        assert_eq!(&value.to_iso8601(), rendered);
        assert_eq!(date_json::infer(rendered), Some(*value));
      }
      (date_json::Value::Array(values), Value::Array(rendered)) => {
        for (value, rendered) in values.iter().zip(rendered) {
          check_temporals_rendered(value, rendered);
        }
      }
      (date_json::Value::Object(map), Value::Object(rendered)) => {
        for ((_, value), (_, rendered)) in map.iter().zip(rendered) {
          check_temporals_rendered(value, rendered);
        }
      }
      _ => {}
    }
  }

  #[test]
  fn fuzz_decode() {
    let plain = Deserializer::new(DecoderConfig::default().with_temporal_inference(false));
    let inferring = Deserializer::default();
    for _ in 0 .. 100 {
      let value = random_container();
      for encoding in [value.to_string(), serde_json::to_string_pretty(&value).unwrap()] {
        let decoded = plain.decode(&encoding).unwrap();
        check_value(&decoded, &value);
        assert!(!has_temporal(&decoded));

        check_value(&inferring.decode_slice(encoding.as_bytes()).unwrap(), &value);
      }
    }
  }

  #[test]
  fn fuzz_render() {
    for _ in 0 .. 100 {
      let value = random_container();
      let decoded = Deserializer::default().decode(&value.to_string()).unwrap();
      for indent in [Indent::Compact, Indent::default(), Indent::Spaces(1)] {
        let rendered = date_json::to_string(&decoded, indent).unwrap();
        check_temporals_rendered(&decoded, &Value::from_str(&rendered).unwrap());

        // Besides temporal values, the rendered value is equivalent to the generated value
        let plain = Deserializer::new(DecoderConfig::default().with_temporal_inference(false));
        let without_temporals = date_json::to_string(
          &plain.decode(&value.to_string()).unwrap(),
          indent,
        )
        .unwrap();
        check_value(&plain.decode(&without_temporals).unwrap(), &value);
      }
    }
  }

  #[test]
  fn temporal_values_are_strings_on_the_wire() {
    let decoded = Deserializer::default()
      .decode(r#"{"a": "January 5, 2023", "b": ["2023-01-05T10:20:30.5+01:00"]}"#)
      .unwrap();
    assert!(matches!(decoded.get("a"), Some(date_json::Value::Temporal { .. })));

    let rendered = date_json::to_string(&decoded, Indent::Compact).unwrap();
    assert_eq!(
      Value::from_str(&rendered).unwrap(),
      serde_json::json!({ "a": "2023-01-05", "b": ["2023-01-05T10:20:30.500+01:00"] })
    );
    let Some(date_json::Value::Temporal { value: Temporal::Date(_), source }) = decoded.get("a")
    else {
      panic!("date wasn't inferred")
    };
    assert_eq!(source, "January 5, 2023");
  }

  #[test]
  fn malformed_agrees() {
    for malformed in [
      "",
      "[",
      "[1,]",
      "{\"a\" 1}",
      "{\"a\": 1,}",
      "01",
      "1.",
      "-",
      "\"\\x\"",
      "\"\\ud800\"",
      "[1] 2",
      "tru",
      "{1: 2}",
      "\"\u{1}\"",
    ] {
      assert!(serde_json::from_str::<Value>(malformed).is_err(), "{malformed}");
      assert!(
        matches!(
          date_json::decode(malformed),
          Err(date_json::JsonError::MalformedJson { .. })
        ),
        "{malformed}"
      );
    }
  }
}
