use crate::{mismatch, BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

impl JsonSerialize for str {
  fn serialize(&self) -> Result<Value, JsonError> {
    Ok(Value::String(self.to_string()))
  }
}

impl JsonSerialize for String {
  fn serialize(&self) -> Result<Value, JsonError> {
    self.as_str().serialize()
  }
}

impl JsonDeserialize for String {
  /// A string inferred to be temporal is bound as the text it was inferred from.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    match value {
      Value::String(string) | Value::Temporal { source: string, .. } => Ok(string),
      value => Err(mismatch("string", &value)),
    }
  }
}

#[test]
fn test_string() {
  let options = BindOptions::default();
  assert_eq!("Rust".serialize().unwrap(), Value::String("Rust".to_string()));
  assert_eq!(String::deserialize(Value::from("Rust"), &options).unwrap(), "Rust");

  let date = chrono::NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
  let inferred =
    Value::Temporal { value: crate::Temporal::Date(date), source: "Jan 5, 2023".to_string() };
  assert_eq!(String::deserialize(inferred, &options).unwrap(), "Jan 5, 2023");
  assert!(String::deserialize(Value::from(1i64), &options).is_err());
}
