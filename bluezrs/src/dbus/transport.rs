//! The bus capabilities the directory is built on.
//!
//! Every remote operation in this crate goes through [`Transport`]. The crate
//! ships [`DbusTransport`](crate::dbus::DbusTransport) for a live bus;
//! anything else implementing the trait (an in-memory fake in tests, a
//! recording proxy) can be handed to [`Bluez::with_transport`](crate::Bluez::with_transport).

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::BusType;
use crate::types::variant::Variant;

/// Property name to value, for one interface on one object.
pub type PropertyMap = BTreeMap<String, Variant>;

/// The object-manager reply: object path to (interface name, properties).
///
/// The directory preserves whatever order the transport produced.
/// [`DbusTransport`](crate::dbus::DbusTransport) sorts objects by path and
/// interfaces by name, since the wire dictionary has no order of its own.
pub type ManagedObjects = Vec<(OwnedObjectPath, Vec<(String, PropertyMap)>)>;

/// Synchronous request/response access to a message bus.
///
/// Each method is one round trip bounded by `timeout` (`None` waits
/// indefinitely). Implementations must not retry and must not leave partial
/// state behind when a call fails.
pub trait Transport: Debug + Send + Sync {
    /// Which bus this transport is connected to.
    fn bus(&self) -> BusType;

    /// `org.freedesktop.DBus.ObjectManager.GetManagedObjects` on `root`.
    fn managed_objects(
        &self,
        service: &str,
        root: &str,
        timeout: Option<Duration>,
    ) -> Result<ManagedObjects>;

    /// `org.freedesktop.DBus.Properties.Get`.
    ///
    /// A property the remote does not have is reported as
    /// [`BluezError::PropertyNotFound`](crate::BluezError::PropertyNotFound).
    fn property_get(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        property: &str,
        timeout: Option<Duration>,
    ) -> Result<Variant>;

    /// `org.freedesktop.DBus.Properties.GetAll`.
    fn property_get_all(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        timeout: Option<Duration>,
    ) -> Result<PropertyMap>;

    /// `org.freedesktop.DBus.Properties.Set`.
    fn property_set(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        property: &str,
        value: &Variant,
        timeout: Option<Duration>,
    ) -> Result<()>;

    /// Invokes `method` and returns the first reply value, if any.
    fn method_call(
        &self,
        service: &str,
        path: &str,
        interface: &str,
        method: &str,
        args: &[Variant],
        timeout: Option<Duration>,
    ) -> Result<Option<Variant>>;
}
