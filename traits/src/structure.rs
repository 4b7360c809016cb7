use crate::{mismatch, BindOptions, JsonError, Map, UnknownKeys, Value, JsonSerialize};

/// A field of a structure, as seen when encoding and binding.
pub struct FieldDescriptor<T> {
  /// The key this field is encoded under.
  pub name: &'static str,
  /// Borrow this field's value, to be encoded.
  pub get: fn(&T) -> &dyn JsonSerialize,
  /// Bind a decoded value onto this field.
  pub set: fn(&mut T, Value, &BindOptions) -> Result<(), JsonError>,
}

impl<T> Clone for FieldDescriptor<T> {
  fn clone(&self) -> Self {
    *self
  }
}
impl<T> Copy for FieldDescriptor<T> {}

impl<T> core::fmt::Debug for FieldDescriptor<T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("FieldDescriptor").field("name", &self.name).finish_non_exhaustive()
  }
}

/// A structure whose fields are encoded as the members of an object.
///
/// This is generally implemented via `#[derive(JsonStructure)]` from `date-json-derive`, which
/// additionally implements `JsonSerialize` and `JsonDeserialize` via the functions within this
/// module.
pub trait JsonStructure: Sized {
  /// The fields of this structure, in the order they're encoded in.
  fn fields() -> Vec<FieldDescriptor<Self>>;

  /// Construct an instance of this structure, before any of its fields are bound.
  fn construct() -> Result<Self, JsonError>;

  /// The mapping holding keys which didn't correspond to a field when this was bound.
  ///
  /// The members of this mapping are encoded after the fields.
  fn overflow(&self) -> Option<&Map> {
    None
  }

  /// The mapping to retain keys which don't correspond to a field within.
  fn overflow_mut(&mut self) -> Option<&mut Map> {
    None
  }
}

/// Encode a structure as an object.
pub fn serialize_structure<T: JsonStructure>(structure: &T) -> Result<Value, JsonError> {
  let mut map = Map::new();
  for field in T::fields() {
    map.insert(field.name.to_string(), (field.get)(structure).serialize()?);
  }
  if let Some(overflow) = structure.overflow() {
    for (key, value) in overflow {
      map.entry(key.clone()).or_insert_with(|| value.clone());
    }
  }
  Ok(Value::Object(map))
}

/// Bind an object onto an existing structure.
///
/// Only the fields whose keys are present are overwritten. Keys without a corresponding field are
/// handled per `BindOptions::unknown_keys`.
///
/// This is not atomic. If binding a field fails, the fields bound prior will remain overwritten.
pub fn merge_structure<T: JsonStructure>(
  structure: &mut T,
  value: Value,
  options: &BindOptions,
) -> Result<(), JsonError> {
  let Value::Object(map) = value else { Err(mismatch(core::any::type_name::<T>(), &value))? };

  let fields = T::fields();
  for (key, value) in map {
    if let Some(field) = fields.iter().find(|field| field.name == key) {
      tracing::trace!(field = field.name, "binding field");
      (field.set)(structure, value, options)?;
      continue;
    }

    match options.unknown_keys {
      UnknownKeys::Retain => match structure.overflow_mut() {
        Some(overflow) => {
          tracing::debug!(key = %key, "retained unknown key");
          overflow.insert(key, value);
        }
        None => tracing::warn!(
          key = %key,
          structure = core::any::type_name::<T>(),
          "dropped unknown key as there's no overflow mapping to retain it within"
        ),
      },
      UnknownKeys::Ignore => tracing::debug!(key = %key, "ignored unknown key"),
      UnknownKeys::Reject => Err(JsonError::UnknownField { name: key })?,
    }
  }
  Ok(())
}

/// Construct a structure and bind an object onto it.
///
/// If the structure can't be constructed, this fails before the object is considered.
pub fn deserialize_structure<T: JsonStructure>(
  value: Value,
  options: &BindOptions,
) -> Result<T, JsonError> {
  let mut structure = T::construct()?;
  merge_structure(&mut structure, value, options)?;
  Ok(structure)
}
