use core::fmt::Write;

use crate::{string::write_string, JsonError, Number, Value};

/// The indentation to render JSON with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Indent {
  /// Render everything on a single line, without any whitespace.
  Compact,
  /// Render each member of a non-empty container on its own line, indented by this many spaces
  /// per level of depth.
  Spaces(usize),
}

impl Default for Indent {
  fn default() -> Self {
    Indent::Spaces(4)
  }
}

fn write_number(out: &mut String, number: Number) -> Result<(), JsonError> {
  // Writing to a `String` is infallible
  let _ = match number {
    Number::Integer(value) => write!(out, "{value}"),
    Number::Unsigned(value) => write!(out, "{value}"),
    Number::Float(value) => {
      if !value.is_finite() {
        Err(JsonError::UnsupportedType { type_name: "f64" })?;
      }
      // `Debug` preserves the fractional part of integral floats, as in `1.0`
      write!(out, "{value:?}")
    }
  };
  Ok(())
}

struct Writer {
  out: String,
  indent: Indent,
}

impl Writer {
  fn newline(&mut self, depth: usize) {
    if let Indent::Spaces(spaces) = self.indent {
      self.out.push('\n');
      self.out.extend(core::iter::repeat_n(' ', spaces * depth));
    }
  }

  fn value(&mut self, value: &Value, depth: usize) -> Result<(), JsonError> {
    match value {
      Value::Null => self.out.push_str("null"),
      Value::Bool(true) => self.out.push_str("true"),
      Value::Bool(false) => self.out.push_str("false"),
      Value::Number(number) => write_number(&mut self.out, *number)?,
      Value::String(string) => write_string(&mut self.out, string),
      Value::Temporal { value, .. } => write_string(&mut self.out, &value.to_iso8601()),
      Value::Array(values) => {
        if values.is_empty() {
          self.out.push_str("[]");
          return Ok(());
        }
        self.out.push('[');
        for (i, value) in values.iter().enumerate() {
          if i != 0 {
            self.out.push(',');
          }
          self.newline(depth + 1);
          self.value(value, depth + 1)?;
        }
        self.newline(depth);
        self.out.push(']');
      }
      Value::Object(map) => {
        if map.is_empty() {
          self.out.push_str("{}");
          return Ok(());
        }
        self.out.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
          if i != 0 {
            self.out.push(',');
          }
          self.newline(depth + 1);
          write_string(&mut self.out, key);
          self.out.push(':');
          if matches!(self.indent, Indent::Spaces(_)) {
            self.out.push(' ');
          }
          self.value(value, depth + 1)?;
        }
        self.newline(depth);
        self.out.push('}');
      }
    }
    Ok(())
  }
}

/// Render a value as JSON.
///
/// Object members are rendered in their order within the map. Temporal values are rendered as
/// their canonical ISO-8601 string, not the string they were inferred from. Non-ASCII characters
/// are written as-is, as the output is UTF-8.
///
/// Non-finite floats have no representation in JSON and cause an error.
pub fn to_string(value: &Value, indent: Indent) -> Result<String, JsonError> {
  let mut writer = Writer { out: String::new(), indent };
  writer.value(value, 0)?;
  Ok(writer.out)
}
