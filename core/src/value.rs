use indexmap::IndexMap;

use crate::{Number, Temporal, Type};

/// An object, with its keys in the order they were inserted (or decoded) in.
pub type Map = IndexMap<String, Value>;

/// A JSON value.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Value {
  /// The `null` unit value.
  #[default]
  Null,
  /// A boolean.
  Bool(bool),
  /// A number.
  Number(Number),
  /// A string.
  String(String),
  /// A string which was inferred to be a date or date-time.
  Temporal {
    /// The date or date-time inferred.
    value: Temporal,
    /// The string this was inferred from.
    source: String,
  },
  /// An array.
  Array(Vec<Value>),
  /// An object.
  Object(Map),
}

impl Value {
  /// The type of this value.
  pub fn kind(&self) -> Type {
    match self {
      Value::Null => Type::Null,
      Value::Bool(_) => Type::Bool,
      Value::Number(_) => Type::Number,
      Value::String(_) => Type::String,
      Value::Temporal { .. } => Type::Temporal,
      Value::Array(_) => Type::Array,
      Value::Object(_) => Type::Object,
    }
  }

  /// If this value is `null`.
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  /// This value as a `bool`, if it's a boolean.
  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(value) => Some(*value),
      _ => None,
    }
  }

  /// This value as a number, if it's a number.
  pub fn as_number(&self) -> Option<Number> {
    match self {
      Value::Number(value) => Some(*value),
      _ => None,
    }
  }

  /// This value as a string.
  ///
  /// For a temporal value, this is the string it was inferred from.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(value) | Value::Temporal { source: value, .. } => Some(value),
      _ => None,
    }
  }

  /// This value as a date or date-time, if it was inferred to be one.
  pub fn as_temporal(&self) -> Option<Temporal> {
    match self {
      Value::Temporal { value, .. } => Some(*value),
      _ => None,
    }
  }

  /// This value as an array, if it's an array.
  pub fn as_array(&self) -> Option<&[Value]> {
    match self {
      Value::Array(values) => Some(values),
      _ => None,
    }
  }

  /// This value as an object, if it's an object.
  pub fn as_object(&self) -> Option<&Map> {
    match self {
      Value::Object(map) => Some(map),
      _ => None,
    }
  }

  /// Look up a key within this value, if it's an object.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.as_object().and_then(|map| map.get(key))
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Value::Bool(value)
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Number(Number::Integer(value))
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Number(Number::Float(value))
  }
}

impl From<Number> for Value {
  fn from(value: Number) -> Self {
    Value::Number(value)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.to_string())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Value::String(value)
  }
}

/// A temporal value, with its canonical ISO-8601 rendering as its source.
impl From<Temporal> for Value {
  fn from(value: Temporal) -> Self {
    Value::Temporal { value, source: value.to_iso8601() }
  }
}

impl From<Vec<Value>> for Value {
  fn from(values: Vec<Value>) -> Self {
    Value::Array(values)
  }
}

impl From<Map> for Value {
  fn from(map: Map) -> Self {
    Value::Object(map)
  }
}

impl FromIterator<(String, Value)> for Value {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Value::Object(iter.into_iter().collect())
  }
}

#[test]
fn test_accessors() {
  let date = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
  let value: Value = [
    ("a".to_string(), Value::from(Temporal::Date(date))),
    ("b".to_string(), Value::from("b")),
    ("c".to_string(), Value::from(vec![Value::Null, Value::from(true)])),
  ]
  .into_iter()
  .collect();

  assert_eq!(value.kind(), Type::Object);
  assert_eq!(value.get("a").and_then(Value::as_str), Some("2023-01-01"));
  assert_eq!(value.get("a").and_then(Value::as_temporal), Some(Temporal::Date(date)));
  assert_eq!(value.get("b").and_then(Value::as_temporal), None);
  assert_eq!(value.get("c").and_then(Value::as_array).map(<[Value]>::len), Some(2));
  assert!(value.get("d").is_none());
  assert_eq!(
    value.as_object().unwrap().keys().map(String::as_str).collect::<Vec<_>>(),
    ["a", "b", "c"]
  );
}
