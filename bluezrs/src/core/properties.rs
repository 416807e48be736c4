//! Per-object property access.
//!
//! A [`PropertyCache`] is bound to one (bus, service, object path) triple
//! and reads or writes properties of any interface on that object. Every
//! call is a fresh round trip: nothing is kept between calls, so a `get`
//! always reflects the remote at the time of the call. Callers that want a
//! stable view take one [`PropertySnapshot`] with [`PropertyCache::get_all`].

use log::debug;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{BluezError, BusType};
use crate::dbus::{PropertyMap, Transport};
use crate::types::schema;
use crate::types::variant::{FromVariant, Variant};

/// Immutable capture of one interface's properties on one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySnapshot {
    properties: PropertyMap,
}

impl PropertySnapshot {
    pub fn new(properties: PropertyMap) -> Self {
        Self { properties }
    }

    /// Returns the raw value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.properties.get(name)
    }

    /// Returns `name` decoded as `T`, or `None` if it is absent or has a
    /// different type.
    pub fn get_as<T: FromVariant>(&self, name: &str) -> Option<T> {
        self.properties
            .get(name)
            .cloned()
            .and_then(|v| T::from_variant(v).ok())
    }

    /// Decodes `name` as `T`, distinguishing absent from mistyped.
    ///
    /// `interface` is only used to label the error.
    pub fn decode<T: FromVariant>(&self, interface: &str, name: &str) -> Result<T> {
        let value = self
            .properties
            .get(name)
            .cloned()
            .ok_or_else(|| BluezError::PropertyNotFound {
                interface: interface.to_string(),
                property: name.to_string(),
            })?;
        decode_value(interface, name, value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> PropertyMap {
        self.properties
    }
}

impl FromIterator<(String, Variant)> for PropertySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Variant)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }
}

impl From<PropertyMap> for PropertySnapshot {
    fn from(properties: PropertyMap) -> Self {
        Self { properties }
    }
}

pub(crate) fn decode_value<T: FromVariant>(interface: &str, name: &str, value: Variant) -> Result<T> {
    T::from_variant(value).map_err(|found| BluezError::Decode {
        interface: interface.to_string(),
        property: name.to_string(),
        expected: T::KIND,
        found: found.kind(),
    })
}

/// Property access for one remote object.
#[derive(Clone)]
pub struct PropertyCache {
    transport: Arc<dyn Transport>,
    service: String,
    path: OwnedObjectPath,
    timeout: Option<Duration>,
}

impl Debug for PropertyCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyCache")
            .field("bus", &self.transport.bus())
            .field("service", &self.service)
            .field("path", &self.path.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PropertyCache {
    pub fn new(
        transport: Arc<dyn Transport>,
        service: impl Into<String>,
        path: OwnedObjectPath,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            service: service.into(),
            path,
            timeout,
        }
    }

    pub fn bus(&self) -> BusType {
        self.transport.bus()
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    /// Reads one property.
    ///
    /// # Errors
    ///
    /// [`BluezError::PropertyNotFound`] if the object does not expose it, or
    /// any transport error.
    pub fn get(&self, interface: &str, name: &str) -> Result<Variant> {
        self.transport
            .property_get(&self.service, self.path.as_str(), interface, name, self.timeout)
    }

    /// Reads one property and decodes it as `T`.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`BluezError::Decode`] if the remote value
    /// has a different type.
    pub fn get_as<T: FromVariant>(&self, interface: &str, name: &str) -> Result<T> {
        let value = self.get(interface, name)?;
        decode_value(interface, name, value)
    }

    /// Reads every property of `interface` in one round trip.
    pub fn get_all(&self, interface: &str) -> Result<PropertySnapshot> {
        let props = self.transport.property_get_all(
            &self.service,
            self.path.as_str(),
            interface,
            self.timeout,
        )?;
        Ok(PropertySnapshot::new(props))
    }

    /// Writes one property.
    ///
    /// For interfaces with a declared schema the value is checked before
    /// anything is sent: unknown properties, read-only properties and
    /// mistyped values are rejected locally. Other interfaces are passed
    /// through and the remote decides.
    pub fn set(&self, interface: &str, name: &str, value: impl Into<Variant>) -> Result<()> {
        let value = value.into();

        if let Some(decl) = schema::lookup(interface, name) {
            let decl = decl.ok_or_else(|| BluezError::PropertyNotFound {
                interface: interface.to_string(),
                property: name.to_string(),
            })?;
            if !decl.writable() {
                return Err(BluezError::ReadOnly {
                    interface: interface.to_string(),
                    property: name.to_string(),
                });
            }
            if decl.kind != value.kind() {
                return Err(BluezError::TypeMismatch {
                    interface: interface.to_string(),
                    property: name.to_string(),
                    expected: decl.kind,
                    found: value.kind(),
                });
            }
        }

        debug!("Setting {interface}.{name} on {}", self.path.as_str());
        self.transport.property_set(
            &self.service,
            self.path.as_str(),
            interface,
            name,
            &value,
            self.timeout,
        )
    }

    /// Invokes a method on this object.
    pub(crate) fn call(
        &self,
        interface: &str,
        method: &str,
        args: &[Variant],
    ) -> Result<Option<Variant>> {
        self.transport.method_call(
            &self.service,
            self.path.as_str(),
            interface,
            method,
            args,
            self.timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variant::VariantKind;

    fn snapshot() -> PropertySnapshot {
        [
            ("Name".to_string(), Variant::from("hci0-adapter")),
            ("Powered".to_string(), Variant::from(true)),
            ("Class".to_string(), Variant::Unsupported("a{qv}".into())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn snapshot_get_as_ignores_mistyped() {
        let props = snapshot();
        assert_eq!(props.get_as::<String>("Name").as_deref(), Some("hci0-adapter"));
        assert_eq!(props.get_as::<u32>("Name"), None);
        assert_eq!(props.get_as::<bool>("Missing"), None);
    }

    #[test]
    fn snapshot_decode_distinguishes_missing_and_mistyped() {
        let props = snapshot();
        let missing = props.decode::<String>("org.bluez.Adapter1", "Alias").unwrap_err();
        assert!(missing.is_not_found());

        let mistyped = props.decode::<u32>("org.bluez.Adapter1", "Class").unwrap_err();
        assert!(matches!(
            mistyped,
            BluezError::Decode {
                expected: VariantKind::UInt32,
                found: VariantKind::Unsupported,
                ..
            }
        ));

        // the failed read leaves the rest readable
        assert!(props.decode::<bool>("org.bluez.Adapter1", "Powered").unwrap());
    }

    #[test]
    fn snapshot_iterates_in_name_order() {
        let snap = snapshot();
        let names: Vec<&str> = snap.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Class", "Name", "Powered"]);
    }
}
