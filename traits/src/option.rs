use crate::{BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

impl<T: JsonSerialize> JsonSerialize for Option<T> {
  /// This will serialize `Some(value)` as `value` and `None` as `null`.
  fn serialize(&self) -> Result<Value, JsonError> {
    match self {
      Some(value) => value.serialize(),
      None => Ok(Value::Null),
    }
  }
}

impl<T: JsonDeserialize> JsonDeserialize for Option<T> {
  /// This will accept `null` as a representation of `None`.
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    if value.is_null() {
      return Ok(None);
    }
    T::deserialize(value, options).map(Some)
  }

  /// If this is `Some`, a non-null value is merged into the value present.
  fn merge(&mut self, value: Value, options: &BindOptions) -> Result<(), JsonError> {
    match self {
      Some(present) if !value.is_null() => present.merge(value, options),
      _ => {
        *self = Self::deserialize(value, options)?;
        Ok(())
      }
    }
  }
}

#[test]
fn test_option() {
  let options = BindOptions::default();
  assert_eq!(None::<u8>.serialize().unwrap(), Value::Null);
  assert_eq!(Some(1u8).serialize().unwrap(), Value::from(1i64));
  assert_eq!(Option::<u8>::deserialize(Value::Null, &options).unwrap(), None);
  assert_eq!(Option::<u8>::deserialize(Value::from(2i64), &options).unwrap(), Some(2));

  let mut present = Some(1u8);
  present.merge(Value::Null, &options).unwrap();
  assert_eq!(present, None);
  present.merge(Value::from(3i64), &options).unwrap();
  assert_eq!(present, Some(3));
}
