//! Declared property types for the BlueZ interfaces this crate wraps.
//!
//! Writes are checked against this table before anything goes on the wire.
//! Interfaces not listed here are passed through unchecked.

use crate::types::constants::{adapter_property as ap, device_property as dp, interface};
use crate::types::variant::VariantKind;

/// Whether a property may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    ReadWrite,
}

/// The declared type and access of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: &'static str,
    pub kind: VariantKind,
    pub access: Access,
}

impl PropertyDecl {
    const fn new(name: &'static str, kind: VariantKind, access: Access) -> Self {
        Self { name, kind, access }
    }

    pub fn writable(&self) -> bool {
        self.access == Access::ReadWrite
    }
}

use Access::{Read, ReadWrite};
use VariantKind::{Bool, Int16, ObjectPath, Str, StrArray, UInt16, UInt32};

const ADAPTER: &[PropertyDecl] = &[
    PropertyDecl::new(ap::ADDRESS, Str, Read),
    PropertyDecl::new(ap::ALIAS, Str, ReadWrite),
    PropertyDecl::new(ap::CLASS, UInt32, Read),
    PropertyDecl::new(ap::DISCOVERABLE, Bool, ReadWrite),
    PropertyDecl::new(ap::DISCOVERABLE_TIMEOUT, UInt32, ReadWrite),
    PropertyDecl::new(ap::DISCOVERING, Bool, Read),
    PropertyDecl::new(ap::MODALIAS, Str, Read),
    PropertyDecl::new(ap::NAME, Str, Read),
    PropertyDecl::new(ap::PAIRABLE, Bool, ReadWrite),
    PropertyDecl::new(ap::PAIRABLE_TIMEOUT, UInt32, ReadWrite),
    PropertyDecl::new(ap::POWERED, Bool, ReadWrite),
    PropertyDecl::new(ap::UUIDS, StrArray, Read),
];

const DEVICE: &[PropertyDecl] = &[
    PropertyDecl::new(dp::ADAPTER, ObjectPath, Read),
    PropertyDecl::new(dp::ADDRESS, Str, Read),
    PropertyDecl::new(dp::ALIAS, Str, ReadWrite),
    PropertyDecl::new(dp::APPEARANCE, UInt16, Read),
    PropertyDecl::new(dp::BLOCKED, Bool, ReadWrite),
    PropertyDecl::new(dp::CLASS, UInt32, Read),
    PropertyDecl::new(dp::CONNECTED, Bool, Read),
    PropertyDecl::new(dp::ICON, Str, Read),
    PropertyDecl::new(dp::LEGACY_PAIRING, Bool, Read),
    PropertyDecl::new(dp::MODALIAS, Str, Read),
    PropertyDecl::new(dp::NAME, Str, Read),
    PropertyDecl::new(dp::PAIRED, Bool, Read),
    PropertyDecl::new(dp::RSSI, Int16, Read),
    PropertyDecl::new(dp::TRUSTED, Bool, ReadWrite),
    PropertyDecl::new(dp::UUIDS, StrArray, Read),
];

/// Returns the declared properties of `interface_name`, or `None` if the
/// interface is not described here.
pub fn interface_properties(interface_name: &str) -> Option<&'static [PropertyDecl]> {
    match interface_name {
        interface::ADAPTER => Some(ADAPTER),
        interface::DEVICE => Some(DEVICE),
        _ => None,
    }
}

/// Looks up one property declaration.
///
/// The outer `Option` is `None` for unknown interfaces; the inner one is
/// `None` when the interface is known but does not declare `property`.
pub fn lookup(interface_name: &str, property: &str) -> Option<Option<&'static PropertyDecl>> {
    interface_properties(interface_name).map(|decls| decls.iter().find(|d| d.name == property))
}
