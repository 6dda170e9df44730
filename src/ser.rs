//! Converting `serde` data into [`Value`]s.
//!
//! This module provides [`ValueSerializer`], a [`serde::Serializer`] whose
//! output is a [`Value`] ready for rendering, so any `T: Serialize` can be
//! written as a literal expression.
//!
//! ## Mapping
//!
//! - **Scalars**: integers keep their concrete class (`i32` becomes `int32`),
//!   `f64`/`f32` become `double`/`single`, strings and chars become strings
//! - **Homogeneous sequences**: scalars of one class join into a `1×n` row
//! - **Rows of rows**: equal-length rows of one class stack into a matrix
//! - **Record sequences**: structs sharing one field set become a `1×n` struct array
//! - **Everything else**: a `1×n` cell array
//! - **Maps and structs**: scalar records, fields in serialization order
//! - **Enums**: unit variants are strings, other variants are records with
//!   one field named after the variant
//!
//! ## Usage
//!
//! ```rust
//! use litexpr::{to_value, to_expression};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
//! let value = to_value(&points).unwrap();
//! assert!(value.is_struct());
//! assert_eq!(value.shape(), vec![1, 2]);
//!
//! let text = to_expression(&to_value(&vec![1u8, 2, 3]).unwrap()).unwrap();
//! assert_eq!(text, "uint8([1 2 3])");
//! ```

use crate::{Error, FieldMap, NumericClass, Result, Value};
use serde::{ser, Serialize};

/// Serializer producing a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: FieldMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: FieldMap,
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Custom`] for map keys that are not strings, or whatever
/// the type's `Serialize` implementation reports.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::row(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::empty())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::empty())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::empty())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = FieldMap::with_capacity(1);
        map.insert(variant, to_value(value)?);
        Ok(Value::from(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: FieldMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn with_capacity(capacity: usize) -> Self {
        SerializeMap {
            map: FieldMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        collect_sequence(self.vec)
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        collect_sequence(self.vec)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        collect_sequence(self.vec)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = FieldMap::with_capacity(1);
        map.insert(self.variant, collect_sequence(self.vec)?);
        Ok(Value::from(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)?.as_str() {
            Some(s) => {
                self.current_key = Some(s.to_string());
                Ok(())
            }
            None => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::from(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::from(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = FieldMap::with_capacity(1);
        outer.insert(self.variant, Value::from(self.map));
        Ok(Value::from(outer))
    }
}

/// What elements must share to be joined into one array.
#[derive(PartialEq)]
enum JoinKey {
    Numeric(NumericClass),
    Logical,
    Text,
    Struct(Vec<String>),
}

fn join_key(value: &Value) -> Option<JoinKey> {
    match value {
        Value::Numeric(n) => Some(JoinKey::Numeric(n.class())),
        Value::Logical(_) => Some(JoinKey::Logical),
        Value::Text(_) => Some(JoinKey::Text),
        Value::Struct(s) => {
            let mut fields = s.fields().to_vec();
            fields.sort();
            Some(JoinKey::Struct(fields))
        }
        _ => None,
    }
}

fn collect_sequence(elements: Vec<Value>) -> Result<Value> {
    let Some(first) = elements.first() else {
        return Ok(Value::empty());
    };

    let key = join_key(first);
    let uniform = key.is_some() && elements.iter().all(|e| join_key(e) == key);
    if !uniform {
        return Ok(Value::cell_row(elements));
    }

    if elements.iter().all(|e| e.shape() == [1, 1]) {
        return Value::concat(1, &elements);
    }

    // Rows of equal length stack into a matrix; records never do
    let width = first.shape()[1];
    let stackable = !matches!(key, Some(JoinKey::Struct(_)))
        && elements.iter().all(|e| e.shape() == [1, width]);
    if stackable {
        return Value::concat(0, &elements);
    }

    Ok(Value::cell_row(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Sample {
        id: u32,
        name: String,
        score: f64,
        tags: Vec<String>,
        parent: Option<u32>,
    }

    #[test]
    fn test_struct_becomes_record() {
        let s = Sample {
            id: 7,
            name: "a".into(),
            score: 0.5,
            tags: vec!["x".into(), "y".into()],
            parent: None,
        };
        let value = to_value(&s).unwrap();
        let expected = record! {
            "id" => 7u32,
            "name" => "a",
            "score" => 0.5,
            "tags" => Value::strings(1, 2, vec!["x".into(), "y".into()]).unwrap(),
            "parent" => Value::empty(),
        };
        assert_eq!(value, Value::from(expected));
    }

    #[test]
    fn test_homogeneous_sequences() {
        assert_eq!(to_value(&vec![1i16, 2, 3]).unwrap(), Value::row(vec![1i16, 2, 3]));
        assert_eq!(
            to_value(&vec![true, false]).unwrap(),
            Value::logical(1, 2, vec![true, false]).unwrap()
        );
        assert_eq!(
            to_value(&vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
            Value::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap()
        );
    }

    #[test]
    fn test_mixed_sequences_become_cells() {
        let value = to_value(&(1u8, "a", 2.5)).unwrap();
        assert_eq!(
            value,
            Value::cell_row(vec![Value::from(1u8), Value::from("a"), Value::from(2.5)])
        );
        let ragged = to_value(&vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
        assert!(ragged.is_cell());
    }

    #[test]
    fn test_enum_variants() {
        #[derive(Serialize)]
        enum Shape {
            Empty,
            Circle(f64),
            Rect { w: f64, h: f64 },
        }

        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(
            to_value(&Shape::Circle(2.0)).unwrap(),
            Value::from(record! { "Circle" => 2.0 })
        );
        assert_eq!(
            to_value(&Shape::Rect { w: 1.0, h: 2.0 }).unwrap(),
            Value::from(record! { "Rect" => record! { "w" => 1.0, "h" => 2.0 } })
        );
    }

    #[test]
    fn test_map_keys_must_be_strings() {
        let mut ok = BTreeMap::new();
        ok.insert("k", 1.0);
        assert!(to_value(&ok).unwrap().is_struct());

        let mut bad = BTreeMap::new();
        bad.insert(1, 1.0);
        assert!(matches!(to_value(&bad), Err(Error::Custom(_))));
    }

    struct Bytes<'a>(&'a [u8]);

    impl Serialize for Bytes<'_> {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.0)
        }
    }

    #[test]
    fn test_bytes_are_uint8() {
        let value = to_value(&Bytes(&[1, 2])).unwrap();
        assert_eq!(value, Value::row(vec![1u8, 2]));
    }
}
