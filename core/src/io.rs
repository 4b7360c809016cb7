//! IO primitives around bytes.

use crate::{Malformed, JsonError};

/// A cursor over a serialization, tracking its position for error reporting.
#[derive(Clone, Debug)]
pub(crate) struct Reader<'bytes> {
  bytes: &'bytes [u8],
  position: usize,
}

impl<'bytes> Reader<'bytes> {
  #[inline(always)]
  pub(crate) fn new(bytes: &'bytes [u8]) -> Self {
    Self { bytes, position: 0 }
  }

  /// The offset of the next byte to be read.
  #[inline(always)]
  pub(crate) fn position(&self) -> usize {
    self.position
  }

  /// If every byte has been read.
  #[inline(always)]
  pub(crate) fn is_empty(&self) -> bool {
    self.position == self.bytes.len()
  }

  /// An error at the current position.
  #[inline(always)]
  pub(crate) fn error(&self, reason: Malformed) -> JsonError {
    JsonError::MalformedJson { position: self.position, reason }
  }

  // The error for when the input ends prematurely.
  fn end(&self) -> JsonError {
    JsonError::MalformedJson { position: self.bytes.len(), reason: Malformed::UnexpectedEnd }
  }

  /// Peek at a byte, `i` bytes ahead of the current position.
  #[inline(always)]
  pub(crate) fn peek(&self, i: usize) -> Result<u8, JsonError> {
    self
      .position
      .checked_add(i)
      .and_then(|i| self.bytes.get(i))
      .copied()
      .ok_or_else(|| self.end())
  }

  /// Read a byte.
  #[inline(always)]
  pub(crate) fn read_byte(&mut self) -> Result<u8, JsonError> {
    let byte = self.peek(0)?;
    self.position += 1;
    Ok(byte)
  }

  /// Read a fixed amount of bytes.
  #[inline(always)]
  pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'bytes [u8], JsonError> {
    let end = self.position.saturating_add(len);
    let Some(bytes) = self.bytes.get(self.position .. end) else {
      Err(self.end())?
    };
    self.position = end;
    Ok(bytes)
  }

  /// Advance the reader until there's a non-whitespace character.
  #[inline(always)]
  pub(crate) fn advance_whitespace(&mut self) {
    // https://datatracker.ietf.org/doc/html/rfc8259#section-2 defines whitespace as follows
    while matches!(self.bytes.get(self.position), Some(b'\x20' | b'\x09' | b'\x0A' | b'\x0D')) {
      self.position += 1;
    }
  }

  /// Read the expected literal, or error with `reason` at the start of the literal.
  pub(crate) fn expect_literal(
    &mut self,
    literal: &[u8],
    reason: Malformed,
  ) -> Result<(), JsonError> {
    let start = self.position;
    match self.read_bytes(literal.len()) {
      Ok(bytes) if bytes == literal => Ok(()),
      _ => Err(JsonError::MalformedJson { position: start, reason }),
    }
  }
}

#[test]
fn reader_reports_positions() {
  let mut reader = Reader::new(b"  \n\tnull");
  reader.advance_whitespace();
  assert_eq!(reader.position(), 4);
  reader.expect_literal(b"null", Malformed::InvalidValue).unwrap();
  assert!(reader.is_empty());
  assert_eq!(
    reader.read_byte(),
    Err(JsonError::MalformedJson { position: 8, reason: Malformed::UnexpectedEnd })
  );

  let mut reader = Reader::new(b"nul");
  assert_eq!(
    reader.expect_literal(b"null", Malformed::InvalidValue),
    Err(JsonError::MalformedJson { position: 0, reason: Malformed::InvalidValue })
  );
}
