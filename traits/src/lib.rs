#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub use date_json::*;

mod options;
mod primitives;
mod float;
mod string;
mod option;
mod boxed;
mod sequences;
mod maps;
mod temporal;
mod value;
mod nested;
mod unsupported;
mod structure;
mod bind;
mod codec;

pub use options::{BindOptions, NestedPolicy, UnknownKeys};
pub use nested::Nested;
pub use structure::{
  FieldDescriptor, JsonStructure, serialize_structure, merge_structure, deserialize_structure,
};
pub use bind::{Target, Bound, bind};
pub use codec::{
  Codec, JsonObject, serialize, deserialize, deserialize_value, deserialize_new, deserialize_into,
};

/// An item which can be encoded as a `Value`.
///
/// Encoding is read-only, and fails with `JsonError::UnsupportedType` for values which have no
/// JSON representation.
pub trait JsonSerialize {
  /// Encode this item as a `Value`.
  fn serialize(&self) -> Result<Value, JsonError>;
}

/// An item which can be bound from a decoded `Value`.
pub trait JsonDeserialize: Sized {
  /// Create this item from a `Value`.
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError>;

  /// Bind a `Value` onto an existing instance of this item.
  ///
  /// By default, this replaces the instance with the deserialized item. Structures override this
  /// to only overwrite the fields present within the `Value`.
  ///
  /// If this fails, the instance may have been partially updated.
  fn merge(&mut self, value: Value, options: &BindOptions) -> Result<(), JsonError> {
    *self = Self::deserialize(value, options)?;
    Ok(())
  }
}

impl<T: ?Sized + JsonSerialize> JsonSerialize for &T {
  fn serialize(&self) -> Result<Value, JsonError> {
    T::serialize(self)
  }
}

/// The error for a value which can't be bound to the expected type.
pub(crate) fn mismatch(expected: &'static str, value: &Value) -> JsonError {
  JsonError::TypeMismatch { expected, found: value.kind() }
}
