use crate::{mismatch, BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

fn serialize_sequence<'serializing, T: 'serializing + JsonSerialize>(
  iter: impl Iterator<Item = &'serializing T>,
) -> Result<Value, JsonError> {
  iter.map(JsonSerialize::serialize).collect::<Result<Vec<_>, _>>().map(Value::Array)
}

impl<T: JsonSerialize> JsonSerialize for [T] {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonSerialize> JsonSerialize for Vec<T> {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonSerialize, const N: usize> JsonSerialize for [T; N] {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonDeserialize> JsonDeserialize for Vec<T> {
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    let Value::Array(values) = value else { Err(mismatch("array", &value))? };
    values.into_iter().map(|value| T::deserialize(value, options)).collect()
  }
}

impl<T: JsonDeserialize, const N: usize> JsonDeserialize for [T; N] {
  /// The array must have exactly `N` elements.
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    let found = value.kind();
    Vec::<T>::deserialize(value, options)?
      .try_into()
      .map_err(|_| JsonError::TypeMismatch { expected: "array of fixed length", found })
  }
}

#[test]
fn test_sequences() {
  let options = BindOptions::default();
  assert_eq!(Vec::<u8>::new().serialize().unwrap(), Value::Array(vec![]));
  assert_eq!(
    [1u8, 2].serialize().unwrap(),
    Value::Array(vec![Value::from(1i64), Value::from(2i64)])
  );

  let array = Value::Array(vec![Value::from(1i64), Value::from(2i64)]);
  assert_eq!(Vec::<u8>::deserialize(array.clone(), &options).unwrap(), [1, 2]);
  assert_eq!(<[u8; 2]>::deserialize(array.clone(), &options).unwrap(), [1, 2]);
  assert!(<[u8; 3]>::deserialize(array, &options).is_err());
  assert!(Vec::<u8>::deserialize(Value::Object(crate::Map::new()), &options).is_err());
  assert!(
    Vec::<u8>::deserialize(Value::Array(vec![Value::from(1i64), Value::Null]), &options).is_err()
  );
}
