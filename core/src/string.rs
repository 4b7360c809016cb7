use crate::{io::Reader, Malformed, JsonError};

/// Calculate the length of the non-ASCII UTF-8 codepoint from its first byte.
///
/// Returns an undefined value if the codepoint is ASCII.
#[inline(always)]
fn non_ascii_utf8_codepoint_len(b: u8) -> usize {
  // The amount of zeroes in a `u8` will be positive and fit within a `usize`
  ((!(b | 0b0100_0000)) | 0b1111).leading_zeros() as usize
}

/// Read a UTF-8 character.
#[inline(always)]
fn read_utf8(reader: &mut Reader<'_>) -> Result<char, JsonError> {
  let start = reader.position();
  let first = reader.peek(0)?;
  // If this is ASCII, immediately return it.
  if (first >> 7) == 0 {
    reader.read_byte()?;
    return Ok(char::from(first));
  }

  let invalid = JsonError::MalformedJson { position: start, reason: Malformed::InvalidUtf8 };
  let len = non_ascii_utf8_codepoint_len(first);
  if !(2 ..= 4).contains(&len) {
    Err(invalid.clone())?;
  }
  let codepoint = reader.read_bytes(len)?;
  let str = core::str::from_utf8(codepoint).map_err(|_| invalid.clone())?;
  str.chars().next().ok_or(invalid)
}

/// Read four hex digits following a `\u`.
fn read_hex(reader: &mut Reader<'_>) -> Result<u16, JsonError> {
  let start = reader.position();
  let invalid = JsonError::MalformedJson { position: start, reason: Malformed::InvalidEscape };
  let hex = reader.read_bytes(4)?;
  if !hex.iter().all(u8::is_ascii_hexdigit) {
    Err(invalid.clone())?;
  }
  // These are ASCII hex digits, so this is UTF-8 and will parse
  let hex = core::str::from_utf8(hex).map_err(|_| invalid.clone())?;
  u16::from_str_radix(hex, 16).map_err(|_| invalid)
}

/// Read the codepoint specified by a `\u` escape, the `\u` having already been read.
fn read_unicode_escape(reader: &mut Reader<'_>) -> Result<char, JsonError> {
  // Position this error at the backslash
  let invalid = JsonError::MalformedJson {
    position: reader.position().saturating_sub(2),
    reason: Malformed::InvalidEscape,
  };

  let next = u32::from(read_hex(reader)?);

  /*
    If the intended value of this codepoint exceeds 0xffff, it's specified to be encoded with its
    UTF-16 surrogate pair. We distinguish and fetch the second part if necessary now. For the
    actual conversion algorithm from the UTF-16 surrogate pair to the UTF codepoint,
    https://en.wikipedia.org/wiki/UTF-16#U+D800_to_U+DFFF_(surrogates) is used as reference.

    https://datatracker.ietf.org/doc/html/rfc8259#section-8.2 allows unpaired surrogates, leaving
    the behavior of implementations unpredictable. As we yield Rust strings, which must be valid
    UTF-8, we reject them.
  */
  let codepoint = match next {
    0xd800 ..= 0xdbff => {
      let high = (next - 0xd800) << 10;
      if reader.read_bytes(2).ok() != Some(&b"\\u"[..]) {
        Err(invalid.clone())?;
      }
      let low = u32::from(read_hex(reader)?);
      if !(0xdc00 ..= 0xdfff).contains(&low) {
        Err(invalid.clone())?;
      }
      high + (low - 0xdc00) + 0x10000
    }
    0xdc00 ..= 0xdfff => Err(invalid.clone())?,
    _ => next,
  };

  char::from_u32(codepoint).ok_or(invalid)
}

/// Read a string from a JSON serialization, handling its escape sequences.
///
/// The reader is expected to be positioned at the opening `"`.
pub(crate) fn read_string(reader: &mut Reader<'_>) -> Result<String, JsonError> {
  if reader.read_byte()? != b'"' {
    Err(reader.error(Malformed::InvalidValue))?;
  }

  let mut string = String::new();
  loop {
    let position = reader.position();
    let this = read_utf8(reader)?;
    match this {
      '"' => break,
      '\\' => {
        // Definitions from https://datatracker.ietf.org/doc/html/rfc8259#section-7
        let escaped = match reader.read_byte()? {
          b'"' => '"',
          b'\\' => '\\',
          b'/' => '/',
          b'b' => '\x08',
          b'f' => '\x0c',
          b'n' => '\n',
          b'r' => '\r',
          b't' => '\t',
          b'u' => read_unicode_escape(reader)?,
          _ => Err(JsonError::MalformedJson { position, reason: Malformed::InvalidEscape })?,
        };
        string.push(escaped);
      }
      // https://datatracker.ietf.org/doc/html/rfc8259#section-7
      '\x20' ..= '\x21' | '\x23' ..= '\x5b' | '\x5d' ..= '\u{10ffff}' => string.push(this),
      _ => Err(JsonError::MalformedJson { position, reason: Malformed::InvalidString })?,
    }
  }
  Ok(string)
}

/// Write a string as a JSON string literal, escaping it as needed.
pub(crate) fn write_string(out: &mut String, string: &str) {
  out.push('"');
  for char in string.chars() {
    match char {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\x08' => out.push_str("\\b"),
      '\x0c' => out.push_str("\\f"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\x00' ..= '\x1f' => {
        use core::fmt::Write;
        // Writing to a `String` is infallible
        let _ = write!(out, "\\u{:04x}", u32::from(char));
      }
      _ => out.push(char),
    }
  }
  out.push('"');
}

#[cfg(test)]
fn string(str: &str) -> Result<String, JsonError> {
  read_string(&mut Reader::new(str.as_bytes()))
}

#[test]
fn test_non_ascii_utf8_codepoint_len() {
  for (char, len) in [('\u{80}', 2), ('\u{800}', 3), ('\u{10000}', 4), ('\u{10ffff}', 4)] {
    assert_eq!(non_ascii_utf8_codepoint_len(char.to_string().as_bytes()[0]), len);
  }
}

#[test]
fn test_read_string() {
  assert_eq!(string(r#""""#).unwrap(), "");
  assert_eq!(string(r#""Rust""#).unwrap(), "Rust");
  assert_eq!(string(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap(), "a\"b\\c/d\x08\x0c\n\r\t");
  assert_eq!(string(r#""é€""#).unwrap(), "é€");
  assert_eq!(string(r#""😀""#).unwrap(), "😀");
  assert_eq!(string("\"κόσμε\"").unwrap(), "κόσμε");

  let mut reader = Reader::new(br#""abc", 1"#);
  assert_eq!(read_string(&mut reader).unwrap(), "abc");
  assert_eq!(reader.position(), 5);
}

#[test]
fn test_read_invalid_string() {
  let reason = |str: &str| match string(str) {
    Err(JsonError::MalformedJson { reason, .. }) => reason,
    other => panic!("{str} yielded {other:?}"),
  };
  assert_eq!(reason("\"abc"), Malformed::UnexpectedEnd);
  assert_eq!(reason("\"a\nb\""), Malformed::InvalidString);
  assert_eq!(reason(r#""\x""#), Malformed::InvalidEscape);
  assert_eq!(reason(r#""\u12G4""#), Malformed::InvalidEscape);
  assert_eq!(reason(r#""\ud83d""#), Malformed::InvalidEscape);
  assert_eq!(reason(r#""\ud83dabcdef""#), Malformed::InvalidEscape);
  assert_eq!(reason(r#""\ude00""#), Malformed::InvalidEscape);

  assert_eq!(
    read_string(&mut Reader::new(b"\"\xffabc\"")),
    Err(JsonError::MalformedJson { position: 1, reason: Malformed::InvalidUtf8 })
  );
  // A lead byte followed by a byte which doesn't continue the codepoint
  assert_eq!(
    read_string(&mut Reader::new(b"\"a\xc3(\"")),
    Err(JsonError::MalformedJson { position: 2, reason: Malformed::InvalidUtf8 })
  );
}

#[test]
fn test_write_string() {
  let written = |str: &str| {
    let mut out = String::new();
    write_string(&mut out, str);
    out
  };
  assert_eq!(written("Rust"), r#""Rust""#);
  assert_eq!(written("a\"b\\c\n"), r#""a\"b\\c\n""#);
  assert_eq!(written("\x01"), r#""\u0001""#);
  assert_eq!(written("é/"), "\"é/\"");

  for str in ["", "a\"b", "\x00\x1f\x7f", "😀 κόσμε", "\\u0000"] {
    assert_eq!(string(&written(str)).unwrap(), str);
  }
}
