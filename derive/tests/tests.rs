use std::fs::File;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use date_json_traits::*;
use date_json_derive::JsonStructure;

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
pub struct Inner {
  #[key("Name")]
  pub name: String,
  #[key("Created")]
  created: Option<NaiveDate>,
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
pub(crate) struct Outer {
  /// A documented field, to ensure documentation doesn't interfere with the attributes.
  #[key("String")]
  pub(crate) string: String,
  #[key("Integer")]
  integer: i64,
  #[key("Decimal")]
  decimal: f64,
  #[key("Boolean")]
  boolean: bool,
  #[key("DateTime")]
  date_time: Option<NaiveDateTime>,
  #[key("Inner")]
  inner: Inner,
  #[key("List")]
  list: Vec<Value>,
  #[key("Dic")]
  dic: Map,
}

fn outer() -> Outer {
  Outer {
    string: "Hello".to_string(),
    integer: 42,
    decimal: 2.5,
    boolean: true,
    date_time: NaiveDate::from_ymd_opt(2023, 1, 5)
      .and_then(|date| date.and_hms_micro_opt(10, 20, 30, 123_456)),
    inner: Inner { name: "inner".to_string(), created: NaiveDate::from_ymd_opt(2022, 12, 31) },
    list: vec![Value::from(1i64), Value::from("two"), Value::from(3.5)],
    dic: [("key".to_string(), Value::from("value"))].into_iter().collect(),
  }
}

const OUTER: &str = r#"{
    "String": "Hello",
    "Integer": 42,
    "Decimal": 2.5,
    "Boolean": true,
    "DateTime": "2023-01-05T10:20:30.123456",
    "Inner": {
        "Name": "inner",
        "Created": "2022-12-31"
    },
    "List": [
        1,
        "two",
        3.5
    ],
    "Dic": {
        "key": "value"
    }
}"#;

#[test]
fn test_narrative() {
  // Serialize
  let mut outer = outer();
  assert_eq!(serialize(&outer).unwrap(), OUTER);
  assert_eq!(outer.to_json().unwrap(), OUTER);

  // Mutate and re-serialize
  outer.integer = 43;
  outer.inner.name = "renamed".to_string();
  let json = serialize(&outer).unwrap();
  assert!(json.contains(r#""Integer": 43"#));
  assert!(json.contains(r#""Name": "renamed""#));

  // Deserialize into an existing instance
  let mut existing = Outer::default();
  let updated = deserialize(&json, Target::Instance(&mut existing)).unwrap().updated().unwrap();
  assert_eq!(updated.integer, 43);
  assert_eq!(existing, outer);

  let mut existing = Outer::default();
  existing.from_json(OUTER).unwrap();
  assert_eq!(existing, self::outer());

  // Deserialize into a new instance
  let constructed = deserialize::<Outer>(&json, Target::Type).unwrap().constructed().unwrap();
  assert_eq!(constructed, outer);

  // Deserialize without a target
  let raw = deserialize::<Outer>(&json, Target::None).unwrap().raw().unwrap();
  assert!(matches!(
    raw.get("DateTime"),
    Some(Value::Temporal { value: Temporal::DateTime(_), .. })
  ));
  assert!(matches!(
    raw.get("Inner").and_then(|inner| inner.get("Created")),
    Some(Value::Temporal { value: Temporal::Date(_), .. })
  ));
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Flat {
  a: u8,
  b: i32,
  c: String,
  d: Option<u64>,
  e: bool,
}

#[test]
fn test_flat_round_trip() {
  let flat = Flat { a: 0xff, b: -7, c: "abc".to_string(), d: Some(u64::MAX), e: false };
  let json = serialize(&flat).unwrap();
  assert_eq!(deserialize_new::<Flat>(&json).unwrap(), flat);

  let compact = Codec::default().with_indent(Indent::Compact);
  assert_eq!(
    compact.serialize(&flat).unwrap(),
    r#"{"a":255,"b":-7,"c":"abc","d":18446744073709551615,"e":false}"#
  );

  // Keys absent from the JSON are left to their `Default` initialization
  assert_eq!(deserialize_new::<Flat>(r#"{"b": 1}"#).unwrap(), Flat { b: 1, ..Flat::default() });

  // Values out of range for a field are a mismatch
  assert_eq!(
    deserialize_new::<Flat>(r#"{"a": 256}"#),
    Err(JsonError::TypeMismatch { expected: "u8", found: Type::Number })
  );
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Stamped {
  day: Option<NaiveDate>,
  local: Option<NaiveDateTime>,
  at: Option<DateTime<chrono::FixedOffset>>,
  utc: Option<DateTime<chrono::Utc>>,
}

#[test]
fn test_temporal_round_trip() {
  let local = NaiveDate::from_ymd_opt(2023, 1, 5)
    .and_then(|date| date.and_hms_nano_opt(10, 20, 30, 123_456_789))
    .unwrap();
  let offset = chrono::FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
  let stamped = Stamped {
    day: Some(local.date()),
    local: Some(local),
    at: Some(local.and_local_timezone(offset).unwrap()),
    utc: Some(local.and_utc()),
  };

  let json = Codec::default().with_indent(Indent::Compact).serialize(&stamped).unwrap();
  assert_eq!(
    json,
    r#"{"day":"2023-01-05","local":"2023-01-05T10:20:30.123456789","at":"2023-01-05T10:20:30.123456789+05:30","utc":"2023-01-05T10:20:30.123456789+00:00"}"#
  );
  assert_eq!(deserialize_new::<Stamped>(&json).unwrap(), stamped);

  // Typed fields still bind when inference is disabled while decoding
  let codec =
    Codec::default().with_decoder(DecoderConfig::default().with_temporal_inference(false));
  assert!(matches!(codec.deserialize_value(&json).unwrap().get("day"), Some(Value::String(_))));
  assert_eq!(codec.deserialize_new::<Stamped>(&json).unwrap(), stamped);
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Note {
  text: String,
  value: Value,
}

#[test]
fn test_uniform_inference() {
  let value = deserialize_value(r#"{"x": "2023-01-01"}"#).unwrap();
  let Some(Value::Temporal { value: Temporal::Date(date), source }) = value.get("x") else {
    panic!("string wasn't inferred to be a date")
  };
  assert_eq!(*date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
  assert_eq!(source, "2023-01-01");

  // Inference applies regardless of the type of the field, yet strings keep their text
  let note = deserialize_new::<Note>(r#"{"text": "2023-01-01", "value": "2023-01-01"}"#).unwrap();
  assert_eq!(note.text, "2023-01-01");
  assert!(matches!(note.value, Value::Temporal { value: Temporal::Date(_), .. }));

  // Including false positives
  let note = deserialize_new::<Note>(r#"{"text": "room 12", "value": "room 12"}"#).unwrap();
  assert_eq!(note.text, "room 12");
  assert!(matches!(note.value, Value::Temporal { .. }));
}

#[test]
fn test_fallback() {
  let value = deserialize_value(r#"{"x": "not a date at all !!"}"#).unwrap();
  assert_eq!(value.get("x"), Some(&Value::from("not a date at all !!")));

  let note = deserialize_new::<Note>(r#"{"value": "not a date at all !!"}"#).unwrap();
  assert_eq!(note.value, Value::from("not a date at all !!"));
}

#[derive(Debug, Default, JsonStructure)]
struct Handle {
  name: String,
  file: Option<File>,
}

#[test]
fn test_unsupported() {
  let mut handle = Handle { name: "handle".to_string(), file: None };
  assert!(serialize(&handle).is_ok());

  handle.file = Some(File::open(file!()).or_else(|_| File::open("Cargo.toml")).unwrap());
  assert_eq!(serialize(&handle), Err(JsonError::UnsupportedType { type_name: "File" }));
  assert_eq!(
    deserialize_new::<Handle>(r#"{"file": 1}"#).unwrap_err(),
    JsonError::UnsupportedType { type_name: "File" }
  );
}

#[test]
fn test_partial_binding() {
  let mut outer = outer();
  deserialize_into(r#"{"Integer": 7, "Inner": {"Name": "x"}}"#, &mut outer).unwrap();
  assert_eq!(outer.integer, 7);
  // Structures nested directly are merged into, not replaced
  assert_eq!(
    outer.inner,
    Inner { name: "x".to_string(), created: NaiveDate::from_ymd_opt(2022, 12, 31) }
  );
  assert_eq!(Outer { integer: 42, inner: self::outer().inner, ..outer }, self::outer());

  // Binding isn't atomic
  let mut outer = self::outer();
  assert!(deserialize_into(r#"{"String": "changed", "Integer": "seven"}"#, &mut outer).is_err());
  assert_eq!(outer.string, "changed");
  assert_eq!(outer.integer, 42);
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Holder {
  label: String,
  child: Nested<Inner>,
}

fn holder() -> Holder {
  Holder {
    label: "holder".to_string(),
    child: Nested::Instance(Inner {
      name: "child".to_string(),
      created: NaiveDate::from_ymd_opt(2020, 2, 29),
    }),
  }
}

#[test]
fn test_nested_shallow() {
  // A nested mapping is bound as-is, losing the instance it replaces
  let mut holder = holder();
  deserialize_into(r#"{"child": {"Name": "replaced"}}"#, &mut holder).unwrap();
  assert_eq!(holder.child.instance(), None);
  let raw = holder.child.raw().unwrap();
  assert_eq!(raw.get("Name"), Some(&Value::from("replaced")));
  assert_eq!(raw.get("Created"), None);

  // It's still encoded as it was decoded
  assert_eq!(
    Codec::default().with_indent(Indent::Compact).serialize(&holder).unwrap(),
    r#"{"label":"holder","child":{"Name":"replaced"}}"#
  );

  let constructed = deserialize_new::<Holder>(r#"{"child": {"Name": "new"}}"#).unwrap();
  assert!(constructed.child.raw().is_some());
}

#[test]
fn test_nested_recursive() {
  let codec =
    Codec::default().with_bind(BindOptions::default().with_nested(NestedPolicy::Recursive));

  let mut holder = holder();
  codec.deserialize_into(r#"{"child": {"Name": "merged"}}"#, &mut holder).unwrap();
  assert_eq!(
    holder.child.instance(),
    Some(&Inner { name: "merged".to_string(), created: NaiveDate::from_ymd_opt(2020, 2, 29) })
  );

  let constructed = codec.deserialize_new::<Holder>(r#"{"child": {"Name": "new"}}"#).unwrap();
  assert_eq!(
    constructed.child,
    Nested::Instance(Inner { name: "new".to_string(), created: None })
  );

  // A raw mapping is promoted to an instance before being merged into
  let mut holder = Holder { label: String::new(), child: Nested::Raw(Map::new()) };
  codec.deserialize_into(r#"{"child": {"Created": "2021-03-04"}}"#, &mut holder).unwrap();
  assert_eq!(
    holder.child.instance().and_then(|inner| inner.created),
    NaiveDate::from_ymd_opt(2021, 3, 4)
  );
}

#[test]
fn test_nested_recursive_failure_keeps_raw() {
  let codec =
    Codec::default().with_bind(BindOptions::default().with_nested(NestedPolicy::Recursive));

  let raw: Map = [("Created".to_string(), Value::from("bogus"))].into_iter().collect();
  let mut holder = Holder { label: String::new(), child: Nested::Raw(raw.clone()) };
  assert_eq!(
    codec.deserialize_into(r#"{"child": {"Name": "x"}}"#, &mut holder).err(),
    Some(JsonError::TypeMismatch { expected: "date", found: Type::String })
  );
  assert_eq!(holder.child.raw(), Some(&raw));
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Open {
  id: u32,
  #[overflow]
  extra: Map,
}

#[test]
fn test_unknown_keys() {
  const JSON: &str = r#"{"id": 1, "colour": "red"}"#;

  let retained = deserialize_new::<Open>(JSON).unwrap();
  assert_eq!(retained.id, 1);
  assert_eq!(retained.extra.get("colour"), Some(&Value::from("red")));
  assert_eq!(
    Codec::default().with_indent(Indent::Compact).serialize(&retained).unwrap(),
    r#"{"id":1,"colour":"red"}"#
  );

  let ignore =
    Codec::default().with_bind(BindOptions::default().with_unknown_keys(UnknownKeys::Ignore));
  let ignored = ignore.deserialize_new::<Open>(JSON).unwrap();
  assert_eq!(ignored, Open { id: 1, extra: Map::new() });

  let reject =
    Codec::default().with_bind(BindOptions::default().with_unknown_keys(UnknownKeys::Reject));
  assert_eq!(
    reject.deserialize_new::<Open>(JSON),
    Err(JsonError::UnknownField { name: "colour".to_string() })
  );

  // Without an overflow mapping, retained keys are dropped
  let inner = deserialize_new::<Inner>(r#"{"Name": "n", "Other": 1}"#).unwrap();
  assert_eq!(inner, Inner { name: "n".to_string(), created: None });
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
struct Cached {
  input: u16,
  #[skip]
  cache: Option<u16>,
}

#[test]
fn test_skip() {
  let cached = Cached { input: 3, cache: Some(9) };
  assert_eq!(
    Codec::default().with_indent(Indent::Compact).serialize(&cached).unwrap(),
    r#"{"input":3}"#
  );

  let mut bound = cached.clone();
  deserialize_into(r#"{"input": 4, "cache": 5}"#, &mut bound).unwrap();
  assert_eq!(bound, Cached { input: 4, cache: Some(9) });

  let reject =
    Codec::default().with_bind(BindOptions::default().with_unknown_keys(UnknownKeys::Reject));
  assert_eq!(
    reject.deserialize_new::<Cached>(r#"{"cache": 5}"#),
    Err(JsonError::UnknownField { name: "cache".to_string() })
  );
}

#[derive(Clone, PartialEq, Debug, Default, JsonStructure)]
pub(crate) struct Wrapper<
  T: 'static + core::fmt::Debug + Default + JsonSerialize + JsonDeserialize,
> {
  pub(crate) value: T,
  values: Vec<T>,
  r#type: String,
}

#[test]
fn test_generics() {
  let wrapper = Wrapper { value: 1u8, values: vec![2, 3], r#type: "bytes".to_string() };
  let json = Codec::default().with_indent(Indent::Compact).serialize(&wrapper).unwrap();
  assert_eq!(json, r#"{"value":1,"values":[2,3],"type":"bytes"}"#);
  assert_eq!(deserialize_new::<Wrapper<u8>>(&json).unwrap(), wrapper);

  let nested = Wrapper { value: wrapper.clone(), values: vec![], r#type: "nested".to_string() };
  let json = serialize(&nested).unwrap();
  assert_eq!(deserialize_new::<Wrapper<Wrapper<u8>>>(&json).unwrap(), nested);
}
