#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![no_std]

use core::{borrow::Borrow, str::FromStr, iter::Peekable};

extern crate alloc;
use alloc::{
  vec,
  vec::Vec,
  string::{String, ToString},
  format,
};

extern crate proc_macro;
use proc_macro::{Delimiter, Spacing, Punct, TokenTree, TokenStream};

mod field;
use field::StructField;

// `<` will not open a group, so we use this to take all items within a `< ... >` expression.
fn take_angle_expression(
  iter: &mut Peekable<impl Iterator<Item: Borrow<TokenTree>>>,
) -> TokenStream {
  {
    let Some(peeked) = iter.peek() else { return TokenStream::default() };
    let TokenTree::Punct(punct) = peeked.borrow() else { return TokenStream::default() };
    if punct.as_char() != '<' {
      return TokenStream::default();
    }
  }

  let mut result = vec![];
  let mut count = 0;
  loop {
    let item = iter.next().expect("`TokenTree` unexpectedly terminated when taking `< ... >`");
    result.push(item.borrow().clone());
    if let TokenTree::Punct(punct) = item.borrow() {
      let punct = punct.as_char();
      if punct == '<' {
        count += 1;
      }
      if punct == '>' {
        count -= 1;
      }
      if count == 0 {
        break;
      }
    }
  }
  TokenStream::from_iter(result)
}

// Advance the iterator past the next `,` on this depth, if there is one.
fn skip_comma_delimited(iter: &mut Peekable<impl Iterator<Item: Borrow<TokenTree>>>) {
  loop {
    take_angle_expression(iter);
    let Some(item) = iter.next() else { return };
    if let TokenTree::Punct(punct) = item.borrow() {
      if punct.as_char() == ',' {
        return;
      }
    }
  }
}

struct Struct {
  generic_bounds: String,
  generics: String,
  name: String,
  fields: Vec<StructField>,
}

// This is somewhat comparable to `syn::Generics`, especially its `split_for_impl` method.
fn parse_struct(object: TokenStream) -> Struct {
  let mut object = object.into_iter().peekable();

  while field::parse_optional_outer_attribute(&mut object).is_some() {}
  field::skip_optional_visibility(&mut object);

  match object.next() {
    Some(TokenTree::Ident(ident)) if ident.to_string() == "struct" => {}
    _ => panic!("`JsonStructure` wasn't applied to a `struct`"),
  }
  let name = match object.next() {
    Some(TokenTree::Ident(ident)) => ident.to_string(),
    _ => panic!("`JsonStructure` wasn't applied to a `struct` with a name"),
  };

  let generic_bounds_tree = take_angle_expression(&mut object);

  let mut generics_tree = vec![];
  {
    let mut iter = generic_bounds_tree.clone().into_iter().peekable();
    while let Some(component) = iter.next() {
      // Take until the next colon, used to mark trait bounds
      if let TokenTree::Punct(punct) = &component {
        if punct.as_char() == ':' {
          // Skip the actual bounds
          skip_comma_delimited(&mut iter);
          // Add our own comma delimiter and move to the next item
          generics_tree.push(TokenTree::Punct(Punct::new(',', Spacing::Alone)));
          continue;
        }
      }
      // Push this component as it isn't part of the bounds
      generics_tree.push(component);
    }
  }
  // Ensure this is terminated, which it won't be if the last item had bounds yet didn't have a
  // trailing comma
  if let Some(last) = generics_tree.last() {
    match last {
      TokenTree::Punct(punct) if punct.as_char() == '>' => {}
      _ => generics_tree.push(TokenTree::Punct(Punct::new('>', Spacing::Alone))),
    }
  }

  let generic_bounds = generic_bounds_tree.to_string();
  let generics = TokenStream::from_iter(generics_tree).to_string();

  // This presumably means we don't support `struct`s defined with `where` bounds
  let Some(TokenTree::Group(struct_body)) = object.next() else {
    panic!("`struct`'s name was not followed by its body");
  };
  if struct_body.delimiter() != Delimiter::Brace {
    panic!("`JsonStructure` derivation applied to `struct` with anonymous fields");
  }

  let fields = field::parse_struct_fields(struct_body.stream());
  assert!(
    fields.iter().filter(|field| field.overflow).count() <= 1,
    "`struct` had multiple fields marked `overflow`"
  );
  {
    let mut keys =
      fields.iter().filter(|field| !(field.skip || field.overflow)).map(|field| &field.key);
    while let Some(key) = keys.next() {
      assert!(keys.clone().all(|other| other != key), "multiple fields had the key `{key}`");
    }
  }

  Struct { generic_bounds, generics, name, fields }
}

/// Derive implementations of the `JsonStructure`, `JsonSerialize`, and `JsonDeserialize` traits.
///
/// This _requires_ the `struct` derived for implement `Default`, which is used to construct new
/// instances before binding onto them. Fields whose keys aren't present when binding are left as
/// they were (their `Default` initialization, for new instances). If you wish to detect if a field
/// was omitted, please wrap it in `Option`.
///
/// Fields are encoded in the order they're declared in. They may be encoded under a distinct key
/// using the `key` attribute, accepting a string literal for the key (`key("key")`). Fields may be
/// omitted from encoding and binding with the `skip` attribute.
///
/// A single field of type `date_json_traits::Map` may be marked with the `overflow` attribute.
/// Keys without a corresponding field will be retained within it when binding, and its members
/// will be encoded after the fields.
///
/// As a procedural macro, this will panic causing a compile-time error on any unexpected input.
#[proc_macro_derive(JsonStructure, attributes(key, skip, overflow))]
pub fn derive_json_structure(object: TokenStream) -> TokenStream {
  let Struct { generic_bounds, generics, name, fields } = parse_struct(object);

  let mut descriptors = String::new();
  let mut overflow = String::new();
  for field in &fields {
    let StructField { ident, key, skip, overflow: is_overflow } = field;
    let ident = ident.to_string();
    if *is_overflow {
      overflow = format!(
        r#"
        fn overflow(&self) -> Option<&date_json_traits::Map> {{
          Some(&self.{ident})
        }}
        fn overflow_mut(&mut self) -> Option<&mut date_json_traits::Map> {{
          Some(&mut self.{ident})
        }}
        "#
      );
      continue;
    }
    if *skip {
      continue;
    }

    descriptors.push_str(&format!(
      r#"
      date_json_traits::FieldDescriptor {{
        name: "{key}",
        get: |structure| &structure.{ident},
        set: |structure, value, options| {{
          date_json_traits::JsonDeserialize::merge(&mut structure.{ident}, value, options)
        }},
      }},
      "#
    ));
  }

  TokenStream::from_str(&format!(
    r#"
    impl{generic_bounds} date_json_traits::JsonStructure for {name}{generics}
      where Self: core::default::Default {{
      fn fields() -> ::std::vec::Vec<date_json_traits::FieldDescriptor<Self>> {{
        ::std::vec![{descriptors}]
      }}

      fn construct() -> Result<Self, date_json_traits::JsonError> {{
        Ok(core::default::Default::default())
      }}

      {overflow}
    }}

    impl{generic_bounds} date_json_traits::JsonSerialize for {name}{generics}
      where Self: core::default::Default {{
      fn serialize(&self) -> Result<date_json_traits::Value, date_json_traits::JsonError> {{
        date_json_traits::serialize_structure(self)
      }}
    }}

    impl{generic_bounds} date_json_traits::JsonDeserialize for {name}{generics}
      where Self: core::default::Default {{
      fn deserialize(
        value: date_json_traits::Value,
        options: &date_json_traits::BindOptions,
      ) -> Result<Self, date_json_traits::JsonError> {{
        date_json_traits::deserialize_structure(value, options)
      }}

      fn merge(
        &mut self,
        value: date_json_traits::Value,
        options: &date_json_traits::BindOptions,
      ) -> Result<(), date_json_traits::JsonError> {{
        date_json_traits::merge_structure(self, value, options)
      }}
    }}
    "#
  ))
  .expect("typo in implementation of `JsonStructure`")
}
