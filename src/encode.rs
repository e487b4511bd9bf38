//! Strict JSON encoding.
//!
//! `serde_json` quietly writes `NaN` and `±inf` as `null`. A handler that
//! returns such a value has a bug, and the client should see a 500 rather
//! than a body that silently lost data. [`to_vec`] therefore walks the value
//! once with [`FiniteCheck`] and only then hands it to `serde_json`.

use std::fmt::Display;

use serde::Serialize;
use serde::ser::{self, Serializer};

/// Why a body could not be turned into JSON.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("non-finite float {0} has no JSON representation")]
    NonFinite(f64),

    /// Raised by a `Serialize` impl through [`ser::Error::custom`].
    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ser::Error for EncodeError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Serializes `value` to JSON bytes, rejecting non-finite floats.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    value.serialize(FiniteCheck)?;
    Ok(serde_json::to_vec(value)?)
}

// ── FiniteCheck ───────────────────────────────────────────────────────────────

/// A serializer that produces nothing and fails on the first non-finite float.
#[derive(Clone, Copy)]
struct FiniteCheck;

impl FiniteCheck {
    fn float(v: f64) -> Result<(), EncodeError> {
        if v.is_finite() { Ok(()) } else { Err(EncodeError::NonFinite(v)) }
    }
}

impl Serializer for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_f32(self, v: f32) -> Result<(), EncodeError> { Self::float(f64::from(v)) }
    fn serialize_f64(self, v: f64) -> Result<(), EncodeError> { Self::float(v) }

    fn serialize_bool(self, _: bool) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_i8(self, _: i8) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_i16(self, _: i16) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_i32(self, _: i32) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_i64(self, _: i64) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_i128(self, _: i128) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_u8(self, _: u8) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_u16(self, _: u16) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_u32(self, _: u32) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_u64(self, _: u64) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_u128(self, _: u128) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_char(self, _: char) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_str(self, _: &str) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_bytes(self, _: &[u8]) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_none(self) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_unit(self) -> Result<(), EncodeError> { Ok(()) }
    fn serialize_unit_struct(self, _: &'static str) -> Result<(), EncodeError> { Ok(()) }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self, EncodeError> { Ok(self) }
    fn serialize_tuple(self, _: usize) -> Result<Self, EncodeError> { Ok(self) }
    fn serialize_map(self, _: Option<usize>) -> Result<Self, EncodeError> { Ok(self) }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, EncodeError> {
        Ok(self)
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, EncodeError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, EncodeError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, EncodeError> {
        Ok(self)
    }
}

// Compound values: every element is checked with a fresh `FiniteCheck`.

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), EncodeError> {
        key.serialize(FiniteCheck)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), EncodeError> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Reading {
        sensor: &'static str,
        values: Vec<f64>,
        peak: Option<f32>,
    }

    #[test]
    fn encodes_plain_values() {
        let reading = Reading { sensor: "a", values: vec![1.5, -2.0], peak: Some(3.25) };
        let bytes = to_vec(&reading).unwrap();
        assert_eq!(bytes, br#"{"sensor":"a","values":[1.5,-2.0],"peak":3.25}"#);
    }

    #[test]
    fn rejects_top_level_infinity() {
        assert!(matches!(to_vec(&f64::INFINITY), Err(EncodeError::NonFinite(v)) if v.is_infinite()));
    }

    #[test]
    fn rejects_nan_nested_in_collections() {
        let reading = Reading { sensor: "a", values: vec![1.0, f64::NAN], peak: None };
        assert!(matches!(to_vec(&reading), Err(EncodeError::NonFinite(_))));

        let mut map = BTreeMap::new();
        map.insert("x", vec![Some(f32::NEG_INFINITY)]);
        assert!(matches!(to_vec(&map), Err(EncodeError::NonFinite(_))));
    }

    #[test]
    fn surfaces_serde_json_errors() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "non-string key");
        assert!(matches!(to_vec(&map), Err(EncodeError::Json(_))));
    }

    #[test]
    fn surfaces_custom_errors() {
        struct Refuses;

        impl Serialize for Refuses {
            fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(ser::Error::custom("nope"))
            }
        }

        assert!(matches!(to_vec(&Refuses), Err(EncodeError::Custom(m)) if m == "nope"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let reading = Reading { sensor: "b", values: vec![0.1, 0.2], peak: None };
        assert_eq!(to_vec(&reading).unwrap(), to_vec(&reading).unwrap());
    }
}
