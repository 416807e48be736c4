use log::debug;
use uuid::Uuid;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{BluezError, DeviceInfo};
use crate::core::properties::{PropertyCache, PropertySnapshot};
use crate::types::constants::{device_property as prop, interface, method};
use crate::types::variant::Variant;

/// A remote Bluetooth device known to an adapter (`org.bluez.Device1`).
///
/// Like [`Adapter`](crate::Adapter), this holds only the object path and a
/// property cache bound to it. Actions such as [`connect`](Self::connect)
/// block until BlueZ replies or the configured call timeout expires.
#[derive(Debug, Clone)]
pub struct Device {
    props: PropertyCache,
}

impl Device {
    pub(crate) fn new(props: PropertyCache) -> Self {
        Self { props }
    }

    pub fn path(&self) -> &OwnedObjectPath {
        self.props.path()
    }

    /// Object path of the adapter this device was seen through.
    pub fn adapter(&self) -> Result<OwnedObjectPath> {
        self.props.get_as(interface::DEVICE, prop::ADAPTER)
    }

    pub fn address(&self) -> Result<String> {
        self.props.get_as(interface::DEVICE, prop::ADDRESS)
    }

    pub fn alias(&self) -> Result<String> {
        self.props.get_as(interface::DEVICE, prop::ALIAS)
    }

    /// GAP appearance value; LE devices only.
    pub fn appearance(&self) -> Result<u16> {
        self.props.get_as(interface::DEVICE, prop::APPEARANCE)
    }

    pub fn blocked(&self) -> Result<bool> {
        self.props.get_as(interface::DEVICE, prop::BLOCKED)
    }

    /// Class of Device; BR/EDR devices only.
    pub fn class(&self) -> Result<u32> {
        self.props.get_as(interface::DEVICE, prop::CLASS)
    }

    pub fn connected(&self) -> Result<bool> {
        self.props.get_as(interface::DEVICE, prop::CONNECTED)
    }

    pub fn icon(&self) -> Result<String> {
        self.props.get_as(interface::DEVICE, prop::ICON)
    }

    pub fn legacy_pairing(&self) -> Result<bool> {
        self.props.get_as(interface::DEVICE, prop::LEGACY_PAIRING)
    }

    pub fn modalias(&self) -> Result<String> {
        self.props.get_as(interface::DEVICE, prop::MODALIAS)
    }

    pub fn name(&self) -> Result<String> {
        self.props.get_as(interface::DEVICE, prop::NAME)
    }

    pub fn paired(&self) -> Result<bool> {
        self.props.get_as(interface::DEVICE, prop::PAIRED)
    }

    /// Signal strength of the last inquiry or advertisement, in dBm.
    ///
    /// BlueZ only reports this while discovery is running.
    pub fn rssi(&self) -> Result<i16> {
        self.props.get_as(interface::DEVICE, prop::RSSI)
    }

    pub fn trusted(&self) -> Result<bool> {
        self.props.get_as(interface::DEVICE, prop::TRUSTED)
    }

    pub fn uuids(&self) -> Result<Vec<String>> {
        self.props.get_as(interface::DEVICE, prop::UUIDS)
    }

    pub fn set_alias(&self, alias: &str) -> Result<()> {
        self.props.set(interface::DEVICE, prop::ALIAS, alias)
    }

    pub fn set_blocked(&self, blocked: bool) -> Result<()> {
        self.props.set(interface::DEVICE, prop::BLOCKED, blocked)
    }

    pub fn set_trusted(&self, trusted: bool) -> Result<()> {
        self.props.set(interface::DEVICE, prop::TRUSTED, trusted)
    }

    pub fn properties(&self) -> Result<PropertySnapshot> {
        self.props.get_all(interface::DEVICE)
    }

    pub fn set_property(&self, name: &str, value: impl Into<Variant>) -> Result<()> {
        self.props.set(interface::DEVICE, name, value)
    }

    pub fn info(&self) -> Result<DeviceInfo> {
        let snapshot = self.properties()?;
        Ok(DeviceInfo::from_snapshot(self.path().clone(), &snapshot))
    }

    pub fn cancel_pairing(&self) -> Result<()> {
        self.action(method::CANCEL_PAIRING, &[])
    }

    /// Connects every auto-connectable profile the device supports.
    pub fn connect(&self) -> Result<()> {
        self.action(method::CONNECT, &[])
    }

    /// Connects one profile.
    ///
    /// # Errors
    ///
    /// [`BluezError::InvalidUuid`] if `uuid` is not a UUID; nothing is sent in
    /// that case.
    pub fn connect_profile(&self, uuid: &str) -> Result<()> {
        let uuid = parse_profile(uuid)?;
        self.action(method::CONNECT_PROFILE, &[Variant::Str(uuid)])
    }

    pub fn disconnect(&self) -> Result<()> {
        self.action(method::DISCONNECT, &[])
    }

    /// Disconnects one profile. Same validation as
    /// [`connect_profile`](Self::connect_profile).
    pub fn disconnect_profile(&self, uuid: &str) -> Result<()> {
        let uuid = parse_profile(uuid)?;
        self.action(method::DISCONNECT_PROFILE, &[Variant::Str(uuid)])
    }

    pub fn pair(&self) -> Result<()> {
        self.action(method::PAIR, &[])
    }

    fn action(&self, name: &str, args: &[Variant]) -> Result<()> {
        debug!("{name} on {}", self.path().as_str());
        self.props.call(interface::DEVICE, name, args)?;
        Ok(())
    }
}

/// Normalizes a profile UUID to the lowercase hyphenated form BlueZ expects.
fn parse_profile(uuid: &str) -> Result<String> {
    Uuid::parse_str(uuid)
        .map(|u| u.hyphenated().to_string())
        .map_err(|_| BluezError::InvalidUuid(uuid.to_string()))
}
