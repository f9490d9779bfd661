//! Typed decoding of SEDF atoms.
//!
//! This module provides the [`Deserializer`] that turns a parsed [`Value`] into any
//! type implementing [`serde::Deserialize`]. Parsing is done first by the tree
//! engine; decoding then walks the owned tree.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sedf::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("(:x 1 :y 2)").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```
//!
//! ## Mapping
//!
//! | Atom                  | Decodes as                                   |
//! |-----------------------|----------------------------------------------|
//! | `nil`                 | unit, `None`                                 |
//! | `t`                   | `bool`                                       |
//! | number                | any integer (when integral and in range) or float |
//! | string, symbol        | `String`, `char`, unit enum variant          |
//! | `#( ... )`            | sequences, tuples                            |
//! | `( :k v ... )`        | maps, structs, single-pair enum variants     |

use crate::value::f64_to_i64;
use crate::{Error, Result, SedfMap, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Decodes an owned [`Value`] into `T`.
///
/// # Examples
///
/// ```rust
/// use serde_sedf::{from_value, sedf};
///
/// let nums: Vec<u8> = from_value(sedf!([1, 2, 3])).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Custom`] when the atom does not match the shape of `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// A serde deserializer over one owned SEDF atom.
#[derive(Debug)]
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    pub fn new(value: Value) -> Self {
        Deserializer { value }
    }

    fn invalid_type(&self, expected: &str) -> Error {
        Error::custom(format!(
            "invalid type: {}, expected {}",
            self.value.type_name(),
            expected
        ))
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => match f64_to_i64(n) {
                Some(i) => visitor.visit_i64(i),
                None => visitor.visit_f64(n),
            },
            Value::String(s) | Value::Symbol(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Number(n) => visitor.visit_f32(n as f32),
            _ => Err(self.invalid_type("a number")),
        }
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Number(n) => visitor.visit_f64(n),
            _ => Err(self.invalid_type("a number")),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = match &self.value {
            Value::String(s) | Value::Symbol(s) => s.as_str(),
            _ => return Err(self.invalid_type("a single character")),
        };
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::custom("Expected single character")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(Deserializer::new(value)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            _ => Err(self.invalid_type("nil")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(self.invalid_type("an array")),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(self.invalid_type("an object")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) | Value::Symbol(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) if obj.len() == 1 => {
                let mut pairs = obj.into_iter();
                match pairs.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            Value::Object(_) => Err(Error::custom(
                "Expected enum variant: an object with exactly one key",
            )),
            _ => Err(self.invalid_type("an enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 str string
        bytes byte_buf identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(String, Value)>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: SedfMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant =
            seed.deserialize(IntoDeserializer::<Error>::into_deserializer(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    fn decode<T: DeserializeOwned>(input: &str) -> Result<T> {
        let mut atoms = parse_document(input)?;
        from_value(atoms.remove(0))
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
        email: Option<String>,
        tags: Vec<String>,
    }

    #[test]
    fn test_struct() {
        let person: Person =
            decode(r#"(:name "Ada" :age 36 :email nil :tags #("math" engine))"#).unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".to_string(),
                age: 36,
                email: None,
                tags: vec!["math".to_string(), "engine".to_string()],
            }
        );
    }

    #[test]
    fn test_primitives() {
        assert!(decode::<bool>("t").unwrap());
        assert_eq!(decode::<i64>("-12").unwrap(), -12);
        assert_eq!(decode::<u8>("255").unwrap(), 255);
        assert_eq!(decode::<f64>("2.5").unwrap(), 2.5);
        assert_eq!(decode::<f64>("2").unwrap(), 2.0);
        assert_eq!(decode::<char>("x").unwrap(), 'x');
        assert_eq!(decode::<String>(":sym").unwrap(), ":sym");
        decode::<()>("nil").unwrap();
    }

    #[test]
    fn test_integer_out_of_range() {
        assert!(decode::<u8>("256").is_err());
        assert!(decode::<u32>("-1").is_err());
        assert!(decode::<i32>("1.5").is_err());
    }

    #[test]
    fn test_option() {
        assert_eq!(decode::<Option<i32>>("nil").unwrap(), None);
        assert_eq!(decode::<Option<i32>>("7").unwrap(), Some(7));
    }

    #[test]
    fn test_map_and_tuple() {
        let map: BTreeMap<String, f64> = decode("(:a 1 :b 2.5)").unwrap();
        assert_eq!(map.get("b"), Some(&2.5));

        let tuple: (i32, String, bool) = decode(r#"#(1 "two" t)"#).unwrap();
        assert_eq!(tuple, (1, "two".to_string(), true));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u32, h: u32 },
        Pair(i32, i32),
    }

    #[test]
    fn test_enums() {
        assert_eq!(decode::<Shape>("Empty").unwrap(), Shape::Empty);
        assert_eq!(decode::<Shape>("\"Empty\"").unwrap(), Shape::Empty);
        assert_eq!(decode::<Shape>("(:Circle 1.5)").unwrap(), Shape::Circle(1.5));
        assert_eq!(
            decode::<Shape>("(:Rect (:w 2 :h 3))").unwrap(),
            Shape::Rect { w: 2, h: 3 }
        );
        assert_eq!(decode::<Shape>("(:Pair #(1 2))").unwrap(), Shape::Pair(1, 2));
        assert!(decode::<Shape>("(:Circle 1 :Empty nil)").is_err());
    }

    #[test]
    fn test_enum_variant_from_object_key() {
        assert_eq!(decode::<Shape>("(:Empty nil)").unwrap(), Shape::Empty);
        assert!(decode::<Shape>("(:Empty 1)").is_err());

        let err = decode::<Shape>("(:Square 2)").unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert!(err.to_string().contains("Square"));
    }

    #[test]
    fn test_type_mismatch_is_custom() {
        let err = decode::<Vec<i32>>("(:a 1)").unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert!(err.to_string().contains("expected an array"));
    }
}
