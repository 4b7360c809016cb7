use crate::{BindOptions, JsonError, Value, JsonDeserialize, JsonSerialize};

impl JsonSerialize for Value {
  fn serialize(&self) -> Result<Value, JsonError> {
    Ok(self.clone())
  }
}

impl JsonDeserialize for Value {
  /// The value is bound as-is, retaining any temporal inference.
  fn deserialize(value: Value, _: &BindOptions) -> Result<Self, JsonError> {
    Ok(value)
  }
}
