use std::{fs::File, net::TcpStream};

use crate::{BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

/*
  Handles to operating system resources have no JSON representation. These are implemented, always
  erroring, so structures holding them may still be encoded up to the point of the handle.
*/
macro_rules! unsupported {
  ($($kind: ty),* $(,)?) => {
    $(
      impl JsonSerialize for $kind {
        fn serialize(&self) -> Result<Value, JsonError> {
          Err(JsonError::UnsupportedType { type_name: stringify!($kind) })
        }
      }

      impl JsonDeserialize for $kind {
        fn deserialize(_: Value, _: &BindOptions) -> Result<Self, JsonError> {
          Err(JsonError::UnsupportedType { type_name: stringify!($kind) })
        }
      }
    )*
  };
}

unsupported!(File, TcpStream);

#[test]
fn test_unsupported() {
  let file = File::open(file!()).or_else(|_| File::open("Cargo.toml")).unwrap();
  assert_eq!(file.serialize(), Err(JsonError::UnsupportedType { type_name: "File" }));
  assert!(File::deserialize(Value::Null, &BindOptions::default()).is_err());
}
