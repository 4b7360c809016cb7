use crate::{mismatch, BindOptions, JsonError, Number, Value, JsonDeserialize, JsonSerialize};

impl JsonSerialize for f64 {
  /// Non-finite values have no representation in JSON and will error.
  fn serialize(&self) -> Result<Value, JsonError> {
    if !self.is_finite() {
      Err(JsonError::UnsupportedType { type_name: "f64" })?;
    }
    Ok(Value::Number(Number::Float(*self)))
  }
}

impl JsonSerialize for f32 {
  /// Non-finite values have no representation in JSON and will error.
  fn serialize(&self) -> Result<Value, JsonError> {
    if !self.is_finite() {
      Err(JsonError::UnsupportedType { type_name: "f32" })?;
    }
    Ok(Value::Number(Number::Float(f64::from(*self))))
  }
}

impl JsonDeserialize for f64 {
  /// Integers are accepted, being converted to the nearest `f64`.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    value.as_number().map(|number| number.f64()).ok_or_else(|| mismatch("f64", &value))
  }
}

impl JsonDeserialize for f32 {
  /// Integers are accepted, being converted to the nearest `f32`.
  #[allow(clippy::cast_possible_truncation)]
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    let value = f64::deserialize(value, options).map_err(|e| match e {
      JsonError::TypeMismatch { found, .. } => JsonError::TypeMismatch { expected: "f32", found },
      e => e,
    })?;
    let value = value as f32;
    if !value.is_finite() {
      Err(JsonError::TypeMismatch { expected: "f32", found: date_json::Type::Number })?;
    }
    Ok(value)
  }
}

#[test]
fn test_float() {
  let options = BindOptions::default();
  assert_eq!(1.5f64.serialize().unwrap(), Value::Number(Number::Float(1.5)));
  assert_eq!(1.5f32.serialize().unwrap(), Value::Number(Number::Float(1.5)));
  assert_eq!(f64::NAN.serialize(), Err(JsonError::UnsupportedType { type_name: "f64" }));
  assert_eq!(f32::INFINITY.serialize(), Err(JsonError::UnsupportedType { type_name: "f32" }));

  assert!((f64::deserialize(Value::from(3i64), &options).unwrap() - 3.0).abs() < f64::EPSILON);
  assert!((f32::deserialize(Value::from(0.5), &options).unwrap() - 0.5).abs() < f32::EPSILON);
  assert!(f32::deserialize(Value::from(1e300), &options).is_err());
  assert!(f64::deserialize(Value::Null, &options).is_err());
}
