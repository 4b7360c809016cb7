use crate::{mismatch, BindOptions, JsonError, Number, Value, JsonDeserialize, JsonSerialize};

/*
  Signed integers are bound via `Number::i64`, unsigned integers via `Number::u64`. This rejects
  floats, even if integral, and any integer outside of the type's range.
*/
macro_rules! integers {
  ($($int: ty => $via: ident),* $(,)?) => {
    $(
      impl JsonSerialize for $int {
        #[allow(clippy::useless_conversion)]
        fn serialize(&self) -> Result<Value, JsonError> {
          let value = $via::try_from(*self)
            .map_err(|_| JsonError::UnsupportedType { type_name: stringify!($int) })?;
          Ok(Value::Number(Number::from(value)))
        }
      }

      impl JsonDeserialize for $int {
        fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
          value
            .as_number()
            .and_then(|number| number.$via())
            .and_then(|number| number.try_into().ok())
            .ok_or_else(|| mismatch(stringify!($int), &value))
        }
      }
    )*
  };
}

integers!(
  i8 => i64,
  i16 => i64,
  i32 => i64,
  i64 => i64,
  isize => i64,
  u8 => u64,
  u16 => u64,
  u32 => u64,
  u64 => u64,
  usize => u64,
);

impl JsonSerialize for bool {
  fn serialize(&self) -> Result<Value, JsonError> {
    Ok(Value::Bool(*self))
  }
}

impl JsonDeserialize for bool {
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    value.as_bool().ok_or_else(|| mismatch("bool", &value))
  }
}

#[test]
fn test_integers() {
  let options = BindOptions::default();
  assert_eq!(u8::MAX.serialize().unwrap(), Value::Number(Number::Integer(255)));
  assert_eq!(u64::MAX.serialize().unwrap(), Value::Number(Number::Unsigned(u64::MAX)));
  assert_eq!(i64::MIN.serialize().unwrap(), Value::Number(Number::Integer(i64::MIN)));

  assert_eq!(u8::deserialize(Value::from(255i64), &options).unwrap(), 255);
  assert_eq!(i8::deserialize(Value::from(-128i64), &options).unwrap(), -128);
  assert_eq!(
    u64::deserialize(Value::Number(Number::Unsigned(u64::MAX)), &options).unwrap(),
    u64::MAX
  );
  assert_eq!(
    u8::deserialize(Value::from(256i64), &options),
    Err(JsonError::TypeMismatch { expected: "u8", found: date_json::Type::Number })
  );
  assert!(u32::deserialize(Value::from(-1i64), &options).is_err());
  assert!(i32::deserialize(Value::from(1.0), &options).is_err());
  assert_eq!(
    i32::deserialize(Value::from("1"), &options),
    Err(JsonError::TypeMismatch { expected: "i32", found: date_json::Type::String })
  );
}

#[test]
fn test_bool() {
  let options = BindOptions::default();
  assert_eq!(true.serialize().unwrap(), Value::Bool(true));
  assert!(!bool::deserialize(Value::Bool(false), &options).unwrap());
  assert!(bool::deserialize(Value::Null, &options).is_err());
}
