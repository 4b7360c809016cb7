use chrono::NaiveDate;

use crate::{
  io::Reader, number::read_number, string::read_string, Inference, JsonError, Malformed, Map,
  Value,
};

/// The configuration for decoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DecoderConfig {
  /// If decoded strings should be inferred to be dates and date-times.
  ///
  /// Defaults to `true`.
  pub infer_temporal_strings: bool,
  /// The date to take components missing from an inferred date from.
  ///
  /// Defaults to `None`, which uses today's (local) date.
  pub reference_date: Option<NaiveDate>,
  /// The maximum depth of containers, with the outermost container being at depth `1`.
  ///
  /// Defaults to `None`, for no limit.
  pub max_depth: Option<usize>,
}

impl Default for DecoderConfig {
  fn default() -> Self {
    Self { infer_temporal_strings: true, reference_date: None, max_depth: None }
  }
}

impl DecoderConfig {
  /// Set if decoded strings should be inferred to be dates and date-times.
  #[must_use]
  pub fn with_temporal_inference(mut self, infer_temporal_strings: bool) -> Self {
    self.infer_temporal_strings = infer_temporal_strings;
    self
  }

  /// Set the date to take components missing from an inferred date from.
  #[must_use]
  pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
    self.reference_date = Some(reference_date);
    self
  }

  /// Set the maximum depth of containers.
  #[must_use]
  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = Some(max_depth);
    self
  }
}

/// A container which is being decoded.
enum Frame {
  /// An object, with the key of the value currently being read.
  Object { map: Map, key: String },
  /// An array.
  Array(Vec<Value>),
}

/// Advance past a colon, and any whitespace around it.
#[inline(always)]
fn advance_past_colon(reader: &mut Reader<'_>) -> Result<(), JsonError> {
  reader.advance_whitespace();
  if reader.peek(0)? != b':' {
    Err(reader.error(Malformed::InvalidKeyValueDelimiter))?;
  }
  reader.read_byte()?;
  reader.advance_whitespace();
  Ok(())
}

/// Read a key, and the colon following it.
fn read_key(reader: &mut Reader<'_>) -> Result<String, JsonError> {
  if reader.peek(0)? != b'"' {
    Err(reader.error(Malformed::InvalidKey))?;
  }
  let key = read_string(reader)?;
  advance_past_colon(reader)?;
  Ok(key)
}

/// A decoder for JSON serializations.
///
/// This is iterative, maintaining its own stack of containers, so arbitrarily deep inputs will
/// not overflow the call stack.
#[derive(Clone, Debug)]
pub struct Deserializer {
  config: DecoderConfig,
  inference: Option<Inference>,
}

impl Default for Deserializer {
  fn default() -> Self {
    Self::new(DecoderConfig::default())
  }
}

impl Deserializer {
  /// Create a new decoder.
  ///
  /// If inference is enabled without a reference date, the reference date is today's date as of
  /// this call.
  pub fn new(config: DecoderConfig) -> Self {
    let inference = config
      .infer_temporal_strings
      .then(|| config.reference_date.map_or_else(Inference::today, Inference::new));
    Self { config, inference }
  }

  /// The configuration of this decoder.
  pub fn config(&self) -> &DecoderConfig {
    &self.config
  }

  /// Decode a string value, inferring if it's temporal.
  fn string(&self, string: String) -> Value {
    if let Some(value) = self.inference.as_ref().and_then(|inference| inference.infer(&string)) {
      tracing::trace!(source = %string, inferred = %value, "inferred temporal value");
      return Value::Temporal { value, source: string };
    }
    Value::String(string)
  }

  /// Open a container, erroring if this exceeds the configured depth.
  fn open(&self, reader: &Reader<'_>, stack: &[Frame]) -> Result<(), JsonError> {
    if let Some(max_depth) = self.config.max_depth {
      if stack.len() >= max_depth {
        Err(JsonError::DepthLimitExceeded { position: reader.position() })?;
      }
    }
    Ok(())
  }

  /// Decode a JSON serialization.
  pub fn decode(&self, json: &str) -> Result<Value, JsonError> {
    self.decode_slice(json.as_bytes())
  }

  /// Decode a JSON serialization from its UTF-8 bytes.
  ///
  /// Any value is accepted at the top level. The serialization may be surrounded by whitespace
  /// yet must not have any other characters after the value.
  pub fn decode_slice(&self, json: &[u8]) -> Result<Value, JsonError> {
    let mut reader = Reader::new(json);
    let mut stack: Vec<Frame> = vec![];
    reader.advance_whitespace();

    let value = 'document: loop {
      // Read a value, or open a container and read its first key
      let mut value = match reader.peek(0)? {
        b'{' => {
          self.open(&reader, &stack)?;
          reader.read_byte()?;
          reader.advance_whitespace();
          if reader.peek(0)? == b'}' {
            reader.read_byte()?;
            Value::Object(Map::new())
          } else {
            let key = read_key(&mut reader)?;
            stack.push(Frame::Object { map: Map::new(), key });
            continue;
          }
        }
        b'[' => {
          self.open(&reader, &stack)?;
          reader.read_byte()?;
          reader.advance_whitespace();
          if reader.peek(0)? == b']' {
            reader.read_byte()?;
            Value::Array(vec![])
          } else {
            stack.push(Frame::Array(vec![]));
            continue;
          }
        }
        b'"' => self.string(read_string(&mut reader)?),
        b'-' | b'0' ..= b'9' => Value::Number(read_number(&mut reader)?),
        b't' => {
          reader.expect_literal(b"true", Malformed::InvalidValue)?;
          Value::Bool(true)
        }
        b'f' => {
          reader.expect_literal(b"false", Malformed::InvalidValue)?;
          Value::Bool(false)
        }
        b'n' => {
          reader.expect_literal(b"null", Malformed::InvalidValue)?;
          Value::Null
        }
        _ => Err(reader.error(Malformed::InvalidValue))?,
      };

      // Place the value into its container, closing every container which ends after it
      loop {
        let Some(frame) = stack.last_mut() else { break 'document value };
        let object = match frame {
          Frame::Object { map, key } => {
            map.insert(core::mem::take(key), value);
            true
          }
          Frame::Array(values) => {
            values.push(value);
            false
          }
        };

        reader.advance_whitespace();
        let position = reader.position();
        match reader.read_byte()? {
          b',' => {
            reader.advance_whitespace();
            if matches!(reader.peek(0)?, b']' | b'}') {
              Err(JsonError::MalformedJson { position, reason: Malformed::TrailingComma })?;
            }
            if let Some(Frame::Object { key, .. }) = stack.last_mut() {
              *key = read_key(&mut reader)?;
            }
            break;
          }
          close @ (b'}' | b']') => {
            let closed = match (object, close) {
              (true, b'}') | (false, b']') => stack.pop(),
              _ => None,
            };
            value = match closed {
              Some(Frame::Object { map, .. }) => Value::Object(map),
              Some(Frame::Array(values)) => Value::Array(values),
              None => {
                return Err(JsonError::MalformedJson {
                  position,
                  reason: Malformed::MismatchedDelimiter,
                })
              }
            };
          }
          _ => return Err(JsonError::MalformedJson { position, reason: Malformed::InvalidValue }),
        }
      }
    };

    reader.advance_whitespace();
    if !reader.is_empty() {
      Err(reader.error(Malformed::TrailingCharacters))?;
    }
    Ok(value)
  }
}

/// Decode a JSON serialization with the default configuration.
///
/// Strings are inferred to be temporal, with missing components taken from today's date.
pub fn decode(json: &str) -> Result<Value, JsonError> {
  Deserializer::default().decode(json)
}
