/// How to handle keys without a corresponding field when binding onto a structure.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum UnknownKeys {
  /// Keep the key and its value within the structure's overflow mapping.
  ///
  /// If the structure doesn't have an overflow mapping, the key is dropped with a warning.
  #[default]
  Retain,
  /// Drop the key.
  Ignore,
  /// Fail with `JsonError::UnknownField`.
  Reject,
}

/// How to bind a mapping onto a `Nested` field.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum NestedPolicy {
  /// Replace the field with the mapping as-is, as `Nested::Raw`.
  #[default]
  Shallow,
  /// Merge the mapping into the field's instance, constructing one if the field is raw.
  Recursive,
}

/// Options for binding decoded values.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BindOptions {
  /// How to handle keys without a corresponding field.
  pub unknown_keys: UnknownKeys,
  /// How to bind mappings onto `Nested` fields.
  pub nested: NestedPolicy,
}

impl BindOptions {
  /// Set how to handle keys without a corresponding field.
  #[must_use]
  pub fn with_unknown_keys(mut self, unknown_keys: UnknownKeys) -> Self {
    self.unknown_keys = unknown_keys;
    self
  }

  /// Set how to bind mappings onto `Nested` fields.
  #[must_use]
  pub fn with_nested(mut self, nested: NestedPolicy) -> Self {
    self.nested = nested;
    self
  }
}
