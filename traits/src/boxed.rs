use crate::{BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

impl<T: ?Sized + JsonSerialize> JsonSerialize for Box<T> {
  fn serialize(&self) -> Result<Value, JsonError> {
    T::serialize(self)
  }
}

impl<T: JsonDeserialize> JsonDeserialize for Box<T> {
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    T::deserialize(value, options).map(Box::new)
  }

  fn merge(&mut self, value: Value, options: &BindOptions) -> Result<(), JsonError> {
    T::merge(self, value, options)
  }
}

#[test]
fn test_boxed() {
  let boxed: Box<dyn JsonSerialize> = Box::new(5u8);
  assert_eq!(boxed.serialize().unwrap(), Value::from(5i64));

  let mut boxed = Box::new(Some(1u8));
  boxed.merge(Value::from(2i64), &BindOptions::default()).unwrap();
  assert_eq!(*boxed, Some(2));
}
