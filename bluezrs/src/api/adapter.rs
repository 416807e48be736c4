use log::debug;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::AdapterInfo;
use crate::core::properties::{PropertyCache, PropertySnapshot};
use crate::types::constants::{adapter_property as prop, interface, method};
use crate::types::variant::Variant;

/// A local Bluetooth controller (`org.bluez.Adapter1`).
///
/// Every getter and setter is one round trip; nothing is cached. Obtain one
/// from [`Bluez::find_adapter`](crate::Bluez::find_adapter),
/// [`Bluez::adapters`](crate::Bluez::adapters) or
/// [`Bluez::adapter`](crate::Bluez::adapter).
///
/// # Example
///
/// ```no_run
/// use bluezrs::Bluez;
///
/// # fn example() -> bluezrs::Result<()> {
/// let bluez = Bluez::new()?;
/// if let Some(adapter) = bluez.find_adapter(Some("hci0"))? {
///     adapter.set_powered(true)?;
///     adapter.start_discovery()?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Adapter {
    props: PropertyCache,
}

impl Adapter {
    pub(crate) fn new(props: PropertyCache) -> Self {
        Self { props }
    }

    /// Object path of this adapter, e.g. `/org/bluez/hci0`.
    pub fn path(&self) -> &OwnedObjectPath {
        self.props.path()
    }

    pub fn address(&self) -> Result<String> {
        self.props.get_as(interface::ADAPTER, prop::ADDRESS)
    }

    pub fn alias(&self) -> Result<String> {
        self.props.get_as(interface::ADAPTER, prop::ALIAS)
    }

    /// Raw Class of Device value. See [`DeviceClass`](crate::DeviceClass)
    /// for a decoded form.
    pub fn class(&self) -> Result<u32> {
        self.props.get_as(interface::ADAPTER, prop::CLASS)
    }

    pub fn discoverable(&self) -> Result<bool> {
        self.props.get_as(interface::ADAPTER, prop::DISCOVERABLE)
    }

    /// Seconds the adapter stays discoverable; 0 means forever.
    pub fn discoverable_timeout(&self) -> Result<u32> {
        self.props
            .get_as(interface::ADAPTER, prop::DISCOVERABLE_TIMEOUT)
    }

    pub fn discovering(&self) -> Result<bool> {
        self.props.get_as(interface::ADAPTER, prop::DISCOVERING)
    }

    /// Fails with [`BluezError::PropertyNotFound`](crate::BluezError::PropertyNotFound)
    /// on adapters that do not report one.
    pub fn modalias(&self) -> Result<String> {
        self.props.get_as(interface::ADAPTER, prop::MODALIAS)
    }

    pub fn name(&self) -> Result<String> {
        self.props.get_as(interface::ADAPTER, prop::NAME)
    }

    pub fn pairable(&self) -> Result<bool> {
        self.props.get_as(interface::ADAPTER, prop::PAIRABLE)
    }

    pub fn pairable_timeout(&self) -> Result<u32> {
        self.props.get_as(interface::ADAPTER, prop::PAIRABLE_TIMEOUT)
    }

    pub fn powered(&self) -> Result<bool> {
        self.props.get_as(interface::ADAPTER, prop::POWERED)
    }

    pub fn uuids(&self) -> Result<Vec<String>> {
        self.props.get_as(interface::ADAPTER, prop::UUIDS)
    }

    pub fn set_alias(&self, alias: &str) -> Result<()> {
        self.props.set(interface::ADAPTER, prop::ALIAS, alias)
    }

    pub fn set_discoverable(&self, discoverable: bool) -> Result<()> {
        self.props
            .set(interface::ADAPTER, prop::DISCOVERABLE, discoverable)
    }

    pub fn set_discoverable_timeout(&self, seconds: u32) -> Result<()> {
        self.props
            .set(interface::ADAPTER, prop::DISCOVERABLE_TIMEOUT, seconds)
    }

    pub fn set_pairable(&self, pairable: bool) -> Result<()> {
        self.props.set(interface::ADAPTER, prop::PAIRABLE, pairable)
    }

    pub fn set_pairable_timeout(&self, seconds: u32) -> Result<()> {
        self.props
            .set(interface::ADAPTER, prop::PAIRABLE_TIMEOUT, seconds)
    }

    pub fn set_powered(&self, powered: bool) -> Result<()> {
        self.props.set(interface::ADAPTER, prop::POWERED, powered)
    }

    /// Every `org.bluez.Adapter1` property in one round trip.
    pub fn properties(&self) -> Result<PropertySnapshot> {
        self.props.get_all(interface::ADAPTER)
    }

    /// Writes any `org.bluez.Adapter1` property by name.
    ///
    /// The value is checked against the declared property type first; see
    /// [`PropertyCache::set`].
    pub fn set_property(&self, name: &str, value: impl Into<Variant>) -> Result<()> {
        self.props.set(interface::ADAPTER, name, value)
    }

    /// A summary built from one [`properties`](Self::properties) snapshot.
    pub fn info(&self) -> Result<AdapterInfo> {
        let snapshot = self.properties()?;
        Ok(AdapterInfo::from_snapshot(self.path().clone(), &snapshot))
    }

    /// Removes a known device and its pairing information.
    pub fn remove_device(&self, device: &OwnedObjectPath) -> Result<()> {
        debug!("Removing {} from {}", device.as_str(), self.path().as_str());
        self.props.call(
            interface::ADAPTER,
            method::REMOVE_DEVICE,
            &[Variant::ObjectPath(device.clone())],
        )?;
        Ok(())
    }

    pub fn start_discovery(&self) -> Result<()> {
        debug!("Starting discovery on {}", self.path().as_str());
        self.props
            .call(interface::ADAPTER, method::START_DISCOVERY, &[])?;
        Ok(())
    }

    pub fn stop_discovery(&self) -> Result<()> {
        debug!("Stopping discovery on {}", self.path().as_str());
        self.props
            .call(interface::ADAPTER, method::STOP_DISCOVERY, &[])?;
        Ok(())
    }
}
