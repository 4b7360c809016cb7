#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod io;
mod number;
mod string;
mod value;
mod temporal;
mod deserializer;
mod writer;

pub use number::Number;
pub use value::{Map, Value};
pub use temporal::{Temporal, Inference, infer};
pub use deserializer::{DecoderConfig, Deserializer, decode};
pub use writer::{Indent, to_string};

/// Why a JSON serialization was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Malformed {
  /// The serialization ended while a value was still being read.
  #[error("unexpected end of input")]
  UnexpectedEnd,
  /// The JSON had an invalid key.
  #[error("invalid key")]
  InvalidKey,
  /// The JSON had an invalid delimiter between the key and value (`:` expected).
  #[error("expected `:` after key")]
  InvalidKeyValueDelimiter,
  /// The JSON had an invalid value.
  #[error("invalid value")]
  InvalidValue,
  /// The JSON had an invalid number.
  #[error("invalid number")]
  InvalidNumber,
  /// A string contained an unescaped control character.
  #[error("invalid character within string")]
  InvalidString,
  /// A string contained an invalid escape sequence, or an unpaired UTF-16 surrogate.
  #[error("invalid escape sequence")]
  InvalidEscape,
  /// The serialization was not valid UTF-8.
  #[error("invalid UTF-8")]
  InvalidUtf8,
  /// The JSON had a trailing comma.
  #[error("trailing comma")]
  TrailingComma,
  /// The JSON had mismatched delimiters between the open and close of the structure.
  #[error("mismatched delimiter")]
  MismatchedDelimiter,
  /// Non-whitespace characters followed the serialized value.
  #[error("trailing characters after value")]
  TrailingCharacters,
}

/// The type of a value.
///
/// https://datatracker.ietf.org/doc/html/rfc8259#section-3 defines all possible values, with
/// `Temporal` distinguishing strings which were inferred to be dates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Type {
  /// An object.
  Object,
  /// An array.
  Array,
  /// A string.
  String,
  /// A string which was inferred to be a date or date-time.
  Temporal,
  /// A RFC-8259 number.
  Number,
  /// A boolean.
  Bool,
  /// The `null` unit value.
  Null,
}

impl core::fmt::Display for Type {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Type::Object => "object",
      Type::Array => "array",
      Type::String => "string",
      Type::Temporal => "temporal",
      Type::Number => "number",
      Type::Bool => "boolean",
      Type::Null => "null",
    })
  }
}

/// An error incurred when encoding, decoding, or binding.
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum JsonError {
  /// The input violated the JSON grammar.
  #[error("malformed JSON at byte {position}: {reason}")]
  MalformedJson {
    /// The offset, in bytes, at which the violation was detected.
    position: usize,
    /// What was wrong with the input.
    reason: Malformed,
  },
  /// The input nested deeper than the configured limit.
  #[error("nesting exceeded the configured depth at byte {position}")]
  DepthLimitExceeded {
    /// The offset, in bytes, of the container which exceeded the limit.
    position: usize,
  },
  /// A value without a JSON representation was encountered when encoding.
  #[error("`{type_name}` has no JSON representation")]
  UnsupportedType {
    /// The name of the offending value's type.
    type_name: &'static str,
  },
  /// A decoded value couldn't be bound to the type it was bound to.
  #[error("expected {expected}, found {found}")]
  TypeMismatch {
    /// What the bound type accepts.
    expected: &'static str,
    /// The type of the decoded value.
    found: Type,
  },
  /// A key had no corresponding field, and unknown keys were configured to be rejected.
  #[error("unknown field `{name}`")]
  UnknownField {
    /// The key without a corresponding field.
    name: String,
  },
  /// The zero-argument constructor of the bound type failed.
  #[error("couldn't construct `{type_name}`: {reason}")]
  Construction {
    /// The type which couldn't be constructed.
    type_name: &'static str,
    /// Why it couldn't be constructed.
    reason: String,
  },
}
