use std::{
  hash::{Hash, BuildHasher},
  collections::{BTreeMap, HashMap},
};

use indexmap::IndexMap;

use crate::{mismatch, BindOptions, JsonError, Map, Value, JsonDeserialize, JsonSerialize};

fn serialize_map<'serializing, K: 'serializing + AsRef<str>, T: 'serializing + JsonSerialize>(
  iter: impl Iterator<Item = (&'serializing K, &'serializing T)>,
) -> Result<Value, JsonError> {
  iter
    .map(|(key, value)| Ok((key.as_ref().to_string(), value.serialize()?)))
    .collect::<Result<Map, _>>()
    .map(Value::Object)
}

fn deserialize_map<T: JsonDeserialize, C: FromIterator<(String, T)>>(
  value: Value,
  options: &BindOptions,
) -> Result<C, JsonError> {
  let Value::Object(map) = value else { Err(mismatch("object", &value))? };
  map.into_iter().map(|(key, value)| Ok((key, T::deserialize(value, options)?))).collect()
}

impl<K: AsRef<str>, T: JsonSerialize> JsonSerialize for BTreeMap<K, T> {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_map(self.iter())
  }
}
impl<T: JsonDeserialize> JsonDeserialize for BTreeMap<String, T> {
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    deserialize_map(value, options)
  }
}

impl<K: AsRef<str>, T: JsonSerialize, S> JsonSerialize for HashMap<K, T, S> {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_map(self.iter())
  }
}
impl<T: JsonDeserialize, S: Default + BuildHasher> JsonDeserialize for HashMap<String, T, S> {
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    deserialize_map(value, options)
  }
}

impl<K: AsRef<str>, T: JsonSerialize, S> JsonSerialize for IndexMap<K, T, S> {
  fn serialize(&self) -> Result<Value, JsonError> {
    serialize_map(self.iter())
  }
}
impl<K: From<String> + Hash + Eq, T: JsonDeserialize, S: Default + BuildHasher> JsonDeserialize
  for IndexMap<K, T, S>
{
  /// The order of the keys is preserved.
  fn deserialize(value: Value, options: &BindOptions) -> Result<Self, JsonError> {
    deserialize_map::<T, Vec<_>>(value, options)
      .map(|fields| fields.into_iter().map(|(key, value)| (K::from(key), value)).collect())
  }
}

#[test]
fn btree_map() {
  let options = BindOptions::default();
  assert_eq!(BTreeMap::<String, u16>::new().serialize().unwrap(), Value::Object(Map::new()));
  let test_map = |map: BTreeMap<String, u16>| {
    let serialized = map.serialize().unwrap();
    assert_eq!(BTreeMap::<String, u16>::deserialize(serialized, &options).unwrap(), map);
  };
  test_map(BTreeMap::from([("key1".to_string(), 1)]));
  test_map(BTreeMap::from([("key1".to_string(), 1), ("key2".to_string(), 2)]));
}

#[test]
fn hash_map() {
  let options = BindOptions::default();
  let map = HashMap::from([("key1".to_string(), 1u16), ("key2".to_string(), 2)]);
  assert_eq!(HashMap::<String, u16>::deserialize(map.serialize().unwrap(), &options).unwrap(), map);
  assert!(HashMap::<String, u16>::deserialize(Value::Array(vec![]), &options).is_err());
}

#[test]
fn index_map_preserves_order() {
  let options = BindOptions::default();
  let map: IndexMap<String, u16> =
    [("z".to_string(), 1), ("a".to_string(), 2), ("m".to_string(), 3)].into_iter().collect();
  let value = map.serialize().unwrap();
  assert_eq!(value.as_object().unwrap().keys().collect::<Vec<_>>(), ["z", "a", "m"]);
  assert_eq!(IndexMap::<String, u16>::deserialize(value, &options).unwrap(), map);
}
