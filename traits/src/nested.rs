use crate::{BindOptions, JsonError, Map, NestedPolicy, Value, JsonDeserialize, JsonSerialize};

/// A structured field which may hold a decoded mapping in place of an instance.
///
/// Under `NestedPolicy::Shallow`, binding a mapping onto this replaces it with `Nested::Raw`
/// (losing the instance). Under `NestedPolicy::Recursive`, the mapping is merged into the
/// instance, so keys absent from the mapping keep their prior values.
///
/// Binding any value other than a mapping always binds it as an instance.
#[derive(Clone, PartialEq, Debug)]
pub enum Nested<T> {
  /// An instance of the structure.
  Instance(T),
  /// A mapping bound as-is.
  Raw(Map),
}

impl<T: Default> Default for Nested<T> {
  fn default() -> Self {
    Nested::Instance(T::default())
  }
}

impl<T> From<T> for Nested<T> {
  fn from(instance: T) -> Self {
    Nested::Instance(instance)
  }
}

impl<T> Nested<T> {
  /// The instance, if this holds one.
  pub fn instance(&self) -> Option<&T> {
    match self {
      Nested::Instance(instance) => Some(instance),
      Nested::Raw(_) => None,
    }
  }

  /// The instance, mutably, if this holds one.
  pub fn instance_mut(&mut self) -> Option<&mut T> {
    match self {
      Nested::Instance(instance) => Some(instance),
      Nested::Raw(_) => None,
    }
  }

  /// The mapping, if this holds one.
  pub fn raw(&self) -> Option<&Map> {
    match self {
      Nested::Instance(_) => None,
      Nested::Raw(map) => Some(map),
    }
  }
}

impl<T: JsonSerialize> JsonSerialize for Nested<T> {
  fn serialize(&self) -> Result<Value, JsonError> {
    match self {
      Nested::Instance(instance) => instance.serialize(),
      Nested::Raw(map) => Ok(Value::Object(map.clone())),
    }
  }
}

impl<T: JsonDeserialize> JsonDeserialize for Nested<T> {
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    match (options.nested, value) {
      (NestedPolicy::Shallow, Value::Object(map)) => Ok(Nested::Raw(map)),
      (_, value) => T::deserialize(value, options).map(Nested::Instance),
    }
  }

  fn merge(&mut self, value: Value, options: &BindOptions) -> Result<(), JsonError> {
    match options.nested {
      NestedPolicy::Shallow => {
        if let Value::Object(map) = &value {
          tracing::debug!(keys = map.len(), "kept nested mapping raw");
        }
        *self = Self::deserialize(value, options)?;
      }
      NestedPolicy::Recursive => match self {
        Nested::Instance(instance) => instance.merge(value, options)?,
        Nested::Raw(raw) => {
          let mut instance = T::deserialize(Value::Object(raw.clone()), options)?;
          instance.merge(value, options)?;
          *self = Nested::Instance(instance);
        }
      },
    }
    Ok(())
  }
}

#[test]
fn test_nested() {
  let shallow = BindOptions::default();
  let recursive = BindOptions::default().with_nested(NestedPolicy::Recursive);
  let map: Map = [("a".to_string(), Value::from(1i64))].into_iter().collect();

  let mut nested = Nested::Instance(std::collections::BTreeMap::<String, u8>::new());
  nested.merge(Value::Object(map.clone()), &shallow).unwrap();
  assert_eq!(nested.raw(), Some(&map));
  assert_eq!(nested.serialize().unwrap(), Value::Object(map.clone()));

  nested.merge(Value::Object(map.clone()), &recursive).unwrap();
  assert_eq!(nested.instance().and_then(|instance| instance.get("a")), Some(&1));

  // A raw mapping which can't be promoted is kept as it was
  let invalid: Map = [("a".to_string(), Value::from("x"))].into_iter().collect();
  let mut nested = Nested::<std::collections::BTreeMap<String, u8>>::Raw(invalid.clone());
  assert!(nested.merge(Value::Object(map.clone()), &recursive).is_err());
  assert_eq!(nested.raw(), Some(&invalid));
}
