//! Dynamically-typed property values.
//!
//! [`Variant`] is the crate's owned view of a D-Bus `v` value. It covers the
//! wire types BlueZ uses for adapter and device properties, plus nested
//! string-keyed dictionaries. Anything else is kept as
//! [`Variant::Unsupported`] carrying its signature, so a snapshot never drops
//! a property just because it cannot be decoded.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use zvariant::{OwnedObjectPath, OwnedValue, Value};

/// A dynamically-typed value read from or written to the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Str(String),
    ObjectPath(OwnedObjectPath),
    StrArray(Vec<String>),
    Bytes(Vec<u8>),
    Dict(BTreeMap<String, Variant>),
    /// A value whose wire type has no representation here, tagged with its
    /// D-Bus signature.
    Unsupported(String),
}

/// The type tag of a [`Variant`], displayed as its D-Bus signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Bool,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Double,
    Str,
    ObjectPath,
    StrArray,
    Bytes,
    Dict,
    Unsupported,
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sig = match self {
            Self::Bool => "b",
            Self::Byte => "y",
            Self::Int16 => "n",
            Self::UInt16 => "q",
            Self::Int32 => "i",
            Self::UInt32 => "u",
            Self::Int64 => "x",
            Self::UInt64 => "t",
            Self::Double => "d",
            Self::Str => "s",
            Self::ObjectPath => "o",
            Self::StrArray => "as",
            Self::Bytes => "ay",
            Self::Dict => "a{sv}",
            Self::Unsupported => "unsupported",
        };
        f.write_str(sig)
    }
}

impl Variant {
    /// Returns the type tag of this value.
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Bool(_) => VariantKind::Bool,
            Self::Byte(_) => VariantKind::Byte,
            Self::Int16(_) => VariantKind::Int16,
            Self::UInt16(_) => VariantKind::UInt16,
            Self::Int32(_) => VariantKind::Int32,
            Self::UInt32(_) => VariantKind::UInt32,
            Self::Int64(_) => VariantKind::Int64,
            Self::UInt64(_) => VariantKind::UInt64,
            Self::Double(_) => VariantKind::Double,
            Self::Str(_) => VariantKind::Str,
            Self::ObjectPath(_) => VariantKind::ObjectPath,
            Self::StrArray(_) => VariantKind::StrArray,
            Self::Bytes(_) => VariantKind::Bytes,
            Self::Dict(_) => VariantKind::Dict,
            Self::Unsupported(_) => VariantKind::Unsupported,
        }
    }

    /// Borrows the string payload, if this is a [`Variant::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the object path payload, if this is a [`Variant::ObjectPath`].
    pub fn as_object_path(&self) -> Option<&OwnedObjectPath> {
        match self {
            Self::ObjectPath(p) => Some(p),
            _ => None,
        }
    }

    /// Converts this value into a wire value for sending.
    ///
    /// Returns `None` for dictionaries and unsupported values, which are
    /// never written by this crate.
    pub(crate) fn to_value(&self) -> Option<Value<'static>> {
        let value = match self {
            Self::Bool(v) => Value::from(*v),
            Self::Byte(v) => Value::from(*v),
            Self::Int16(v) => Value::from(*v),
            Self::UInt16(v) => Value::from(*v),
            Self::Int32(v) => Value::from(*v),
            Self::UInt32(v) => Value::from(*v),
            Self::Int64(v) => Value::from(*v),
            Self::UInt64(v) => Value::from(*v),
            Self::Double(v) => Value::from(*v),
            Self::Str(s) => Value::from(s.clone()),
            Self::ObjectPath(p) => Value::from(p.clone().into_inner()),
            Self::StrArray(items) => Value::from(items.clone()),
            Self::Bytes(bytes) => Value::from(bytes.clone()),
            Self::Dict(_) | Self::Unsupported(_) => return None,
        };
        Some(value)
    }
}

impl From<OwnedValue> for Variant {
    fn from(value: OwnedValue) -> Self {
        let signature = value.value_signature().to_string();

        match &*value {
            Value::Bool(v) => return Self::Bool(*v),
            Value::U8(v) => return Self::Byte(*v),
            Value::I16(v) => return Self::Int16(*v),
            Value::U16(v) => return Self::UInt16(*v),
            Value::I32(v) => return Self::Int32(*v),
            Value::U32(v) => return Self::UInt32(*v),
            Value::I64(v) => return Self::Int64(*v),
            Value::U64(v) => return Self::UInt64(*v),
            Value::F64(v) => return Self::Double(*v),
            Value::Str(s) => return Self::Str(s.as_str().to_owned()),
            Value::ObjectPath(p) => return Self::ObjectPath(OwnedObjectPath::from(p.clone())),
            _ => {}
        }

        let decoded = match signature.as_str() {
            "as" => Vec::<String>::try_from(value).ok().map(Self::StrArray),
            "ay" => Vec::<u8>::try_from(value).ok().map(Self::Bytes),
            "a{sv}" => HashMap::<String, OwnedValue>::try_from(value)
                .ok()
                .map(|map| Self::Dict(map.into_iter().map(|(k, v)| (k, v.into())).collect())),
            _ => None,
        };

        decoded.unwrap_or(Self::Unsupported(signature))
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u16> for Variant {
    fn from(v: u16) -> Self {
        Self::UInt16(v)
    }
}

impl From<i16> for Variant {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<u32> for Variant {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<OwnedObjectPath> for Variant {
    fn from(v: OwnedObjectPath) -> Self {
        Self::ObjectPath(v)
    }
}

impl From<Vec<String>> for Variant {
    fn from(v: Vec<String>) -> Self {
        Self::StrArray(v)
    }
}

/// Typed extraction out of a [`Variant`].
///
/// On mismatch the original value is handed back so the caller can report
/// what was actually found.
pub trait FromVariant: Sized {
    /// The kind this type decodes from.
    const KIND: VariantKind;

    fn from_variant(value: Variant) -> std::result::Result<Self, Variant>;
}

macro_rules! from_variant {
    ($ty:ty, $variant:ident) => {
        impl FromVariant for $ty {
            const KIND: VariantKind = VariantKind::$variant;

            fn from_variant(value: Variant) -> std::result::Result<Self, Variant> {
                match value {
                    Variant::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

from_variant!(bool, Bool);
from_variant!(u8, Byte);
from_variant!(i16, Int16);
from_variant!(u16, UInt16);
from_variant!(i32, Int32);
from_variant!(u32, UInt32);
from_variant!(String, Str);
from_variant!(OwnedObjectPath, ObjectPath);
from_variant!(Vec<String>, StrArray);
from_variant!(Vec<u8>, Bytes);
