use crate::{
  bind, BindOptions, Bound, DecoderConfig, Deserializer, Indent, JsonError, JsonStructure, Target,
  Value, JsonDeserialize, JsonSerialize,
};

/// The configuration for encoding, decoding, and binding.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Codec {
  /// The configuration for decoding.
  pub decoder: DecoderConfig,
  /// The options for binding decoded values.
  pub bind: BindOptions,
  /// The indentation to render with.
  pub indent: Indent,
}

impl Codec {
  /// Set the configuration for decoding.
  #[must_use]
  pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
    self.decoder = decoder;
    self
  }

  /// Set the options for binding decoded values.
  #[must_use]
  pub fn with_bind(mut self, bind: BindOptions) -> Self {
    self.bind = bind;
    self
  }

  /// Set the indentation to render with.
  #[must_use]
  pub fn with_indent(mut self, indent: Indent) -> Self {
    self.indent = indent;
    self
  }

  /// Encode an item and render it as JSON.
  pub fn serialize<T: ?Sized + JsonSerialize>(&self, item: &T) -> Result<String, JsonError> {
    date_json::to_string(&item.serialize()?, self.indent)
  }

  /// Decode JSON, without binding it.
  pub fn deserialize_value(&self, json: &str) -> Result<Value, JsonError> {
    Deserializer::new(self.decoder.clone()).decode(json)
  }

  /// Decode JSON and bind it to a target.
  pub fn deserialize<'instance, T: JsonDeserialize>(
    &self,
    json: &str,
    target: Target<'instance, T>,
  ) -> Result<Bound<'instance, T>, JsonError> {
    bind(self.deserialize_value(json)?, target, &self.bind)
  }

  /// Decode JSON and bind it to a new instance.
  pub fn deserialize_new<T: JsonDeserialize>(&self, json: &str) -> Result<T, JsonError> {
    T::deserialize(self.deserialize_value(json)?, &self.bind)
  }

  /// Decode JSON and bind it onto an existing instance, returning the instance.
  ///
  /// If the JSON is malformed, the instance is left unmodified. If binding fails, the instance may
  /// be partially updated.
  pub fn deserialize_into<'instance, T: JsonDeserialize>(
    &self,
    json: &str,
    instance: &'instance mut T,
  ) -> Result<&'instance mut T, JsonError> {
    instance.merge(self.deserialize_value(json)?, &self.bind)?;
    Ok(instance)
  }
}

/// Encode an item and render it as JSON, indented with four spaces.
pub fn serialize<T: ?Sized + JsonSerialize>(item: &T) -> Result<String, JsonError> {
  Codec::default().serialize(item)
}

/// Decode JSON and bind it to a target, with the default configuration.
pub fn deserialize<'instance, T: JsonDeserialize>(
  json: &str,
  target: Target<'instance, T>,
) -> Result<Bound<'instance, T>, JsonError> {
  Codec::default().deserialize(json, target)
}

/// Decode JSON, without binding it, with the default configuration.
pub fn deserialize_value(json: &str) -> Result<Value, JsonError> {
  Codec::default().deserialize_value(json)
}

/// Decode JSON and bind it to a new instance, with the default configuration.
pub fn deserialize_new<T: JsonDeserialize>(json: &str) -> Result<T, JsonError> {
  Codec::default().deserialize_new(json)
}

/// Decode JSON and bind it onto an existing instance, with the default configuration.
pub fn deserialize_into<'instance, T: JsonDeserialize>(
  json: &str,
  instance: &'instance mut T,
) -> Result<&'instance mut T, JsonError> {
  Codec::default().deserialize_into(json, instance)
}

/// A structure which can be converted to and from JSON.
///
/// This is implemented for every `JsonStructure` which can be encoded and bound.
pub trait JsonObject: JsonStructure + JsonSerialize + JsonDeserialize {
  /// Render this structure as JSON, indented with four spaces.
  fn to_json(&self) -> Result<String, JsonError> {
    serialize(self)
  }

  /// Bind JSON onto this structure, overwriting the fields present within it.
  fn from_json(&mut self, json: &str) -> Result<(), JsonError> {
    deserialize_into(json, self).map(|_| ())
  }
}

impl<T: JsonStructure + JsonSerialize + JsonDeserialize> JsonObject for T {}
