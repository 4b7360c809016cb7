use core::iter::Peekable;
use alloc::{
  vec,
  vec::Vec,
  string::{String, ToString},
};

use proc_macro::{Spacing, Delimiter, Ident, TokenTree, TokenStream};

/// A field within a `struct`, as relevant to encoding and binding.
pub(crate) struct StructField {
  /// The identifier, as written (potentially a raw identifier).
  pub(crate) ident: Ident,
  /// The key this field is encoded under.
  pub(crate) key: String,
  /// If this field should be omitted from encoding and binding.
  pub(crate) skip: bool,
  /// If this field is the mapping retaining unknown keys.
  pub(crate) overflow: bool,
}

/// Parse a potentially-present `OuterAttribute`, returning the contained `Attr`.
///
/// This attempts to follow the syntax from
/// <https://doc.rust-lang.org/1.91.0/reference/attributes.html#grammar-OuterAttribute>, but only
/// performs partial validation.
pub(crate) fn parse_optional_outer_attribute(
  iter: &mut Peekable<impl Iterator<Item = TokenTree>>,
) -> Option<TokenStream> {
  // If this is present, it will have the mandatory `#`
  if !matches!(iter.peek(), Some(TokenTree::Punct(pound)) if pound.as_char() == '#') {
    return None;
  }
  let _pound = iter.next().expect("peeked attribute declaration couldn't be consumed");
  let Some(TokenTree::Group(group)) = iter.next() else {
    panic!("attribute declaration wasn't followed by `TokenTree::Group`");
  };
  assert_eq!(group.delimiter(), Delimiter::Bracket, "attribute had unexpected delimiter");
  Some(group.stream())
}

/// Skip a `Visibility`, if present.
///
/// The scope within `pub(...)` is not validated.
pub(crate) fn skip_optional_visibility(iter: &mut Peekable<impl Iterator<Item = TokenTree>>) {
  if !matches!(iter.peek(), Some(TokenTree::Ident(ident)) if ident.to_string() == "pub") {
    return;
  }
  let _pub = iter.next();
  if matches!(
    iter.peek(),
    Some(TokenTree::Group(scope)) if scope.delimiter() == Delimiter::Parenthesis
  ) {
    let _scope = iter.next();
  }
}

// Parse the string literal from `key("...")`.
fn parse_key(arguments: Option<TokenTree>) -> String {
  let Some(TokenTree::Group(group)) = arguments else {
    panic!("`key` attribute not followed with `(...)`")
  };
  assert_eq!(
    group.delimiter(),
    Delimiter::Parenthesis,
    "`key` attribute with a non-parentheses group"
  );
  let mut arguments = group.stream().into_iter();
  let Some(TokenTree::Literal(literal)) = arguments.next() else {
    panic!("`key` attribute with a non-literal argument")
  };
  assert!(arguments.next().is_none(), "`key` attribute with multiple tokens within parentheses");

  let literal = literal.to_string();
  assert!(
    (literal.len() >= 2) && literal.starts_with('"') && literal.ends_with('"'),
    "`key` attribute's argument wasn't a string literal"
  );
  assert!(!literal.contains('\\'), "`key` attribute's argument had an escape sequence");
  literal[1 .. (literal.len() - 1)].to_string()
}

impl StructField {
  /// Parse a `StructField`, if present.
  ///
  /// This attempts to follow the syntax from
  /// <https://doc.rust-lang.org/1.91.0/reference/items/structs.html#grammar-StructField>, but only
  /// performs partial validation.
  fn parse_optional(iter: &mut Peekable<impl Iterator<Item = TokenTree>>) -> Option<Self> {
    iter.peek()?;

    let mut key = None;
    let mut skip = false;
    let mut overflow = false;
    while let Some(attribute) = parse_optional_outer_attribute(iter) {
      let mut attribute = attribute.into_iter();
      let Some(TokenTree::Ident(name)) = attribute.next() else { continue };
      match name.to_string().as_str() {
        "key" => key = Some(parse_key(attribute.next())),
        "skip" => skip = true,
        "overflow" => overflow = true,
        // Documentation, lints, and other derives' attributes
        _ => {}
      }
    }

    skip_optional_visibility(iter);

    let Some(TokenTree::Ident(ident)) = iter.next() else {
      panic!("field within `struct` didn't have an identifier")
    };

    let Some(TokenTree::Punct(colon)) = iter.next() else {
      panic!("colon not found after identifier within `StructField`")
    };
    assert_eq!(colon.as_char(), ':', "colon wasn't a colon");
    assert!(
      matches!(colon.spacing(), Spacing::Alone),
      "colon between identifier and type wasn't independent"
    );

    // Skip the type, which is never named by the generated code
    while let Some(item) = {
      crate::take_angle_expression(iter);
      iter.next()
    } {
      if let TokenTree::Punct(comma) = item {
        if (comma.as_char() == ',') && matches!(comma.spacing(), Spacing::Alone) {
          break;
        }
      }
    }

    let key = key.unwrap_or_else(|| {
      let name = ident.to_string();
      name.strip_prefix("r#").map(ToString::to_string).unwrap_or(name)
    });
    assert!(!(skip && overflow), "field was marked as both `skip` and `overflow`");

    Some(StructField { ident, key, skip, overflow })
  }
}

/// Parse `StructFields`.
///
/// This follows the syntax from
/// <https://doc.rust-lang.org/1.91.0/reference/items/structs.html#grammar-StructFields>.
pub(crate) fn parse_struct_fields(iter: TokenStream) -> Vec<StructField> {
  let mut iter = iter.into_iter().peekable();
  let mut fields = vec![];
  while let Some(field) = StructField::parse_optional(&mut iter) {
    fields.push(field);
  }
  fields
}
