use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;
use zvariant::OwnedObjectPath;

use crate::core::properties::PropertySnapshot;
use crate::types::class::DeviceClass;
use crate::types::constants::{adapter_property as ap, device_property as dp, path, service, timeouts};
use crate::types::variant::VariantKind;

/// Which message bus to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BusType {
    /// The system bus, where BlueZ lives.
    #[default]
    System,
    /// The per-user session bus.
    Session,
}

impl Display for BusType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Session => write!(f, "session"),
        }
    }
}

/// Connection and call settings for a [`Bluez`](crate::Bluez) handle.
///
/// # Example
///
/// ```
/// use bluezrs::{BluezConfig, BusType};
/// use std::time::Duration;
///
/// let config = BluezConfig::new()
///     .with_bus(BusType::System)
///     .with_call_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.service, "org.bluez");
/// assert_eq!(config.call_timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BluezConfig {
    /// Bus to connect to. Defaults to [`BusType::System`].
    pub bus: BusType,
    /// Bus name of the service. Defaults to `org.bluez`.
    pub service: String,
    /// Object path of the object manager. Defaults to `/`.
    pub root: String,
    /// Upper bound on every round trip; `None` waits indefinitely.
    /// Defaults to 25 seconds.
    pub call_timeout: Option<Duration>,
}

impl Default for BluezConfig {
    fn default() -> Self {
        Self {
            bus: BusType::System,
            service: service::BLUEZ.to_string(),
            root: path::ROOT.to_string(),
            call_timeout: Some(timeouts::default_call_timeout()),
        }
    }
}

impl BluezConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bus(mut self, bus: BusType) -> Self {
        self.bus = bus;
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Removes the per-call timeout.
    pub fn without_call_timeout(mut self) -> Self {
        self.call_timeout = None;
        self
    }
}

/// Errors returned by this crate.
///
/// Grouped by how a caller is expected to react:
///
/// - [`Connection`](Self::Connection): the bus is unreachable; nothing else
///   can work.
/// - [`Dbus`](Self::Dbus), [`DbusOperation`](Self::DbusOperation),
///   [`Timeout`](Self::Timeout), [`MalformedReply`](Self::MalformedReply):
///   a round trip failed; the operation was aborted and nothing was kept.
/// - [`Remote`](Self::Remote): BlueZ rejected the call.
/// - [`PropertyNotFound`](Self::PropertyNotFound): a normal outcome to
///   branch on.
/// - [`InvalidPattern`](Self::InvalidPattern), [`InvalidUuid`](Self::InvalidUuid),
///   [`InvalidObjectPath`](Self::InvalidObjectPath): bad caller input,
///   rejected before any round trip.
///
/// Nothing in this crate retries.
#[derive(Debug, Error)]
pub enum BluezError {
    /// Could not connect to the bus.
    #[error("failed to connect to the {bus} bus: {source}")]
    Connection {
        bus: BusType,
        #[source]
        source: zbus::Error,
    },

    /// A D-Bus error outside any round trip, such as a proxy that could not
    /// be built for an invalid bus name, object path or interface name.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A D-Bus round trip failed, with context on which one.
    #[error("{context}: {source}")]
    DbusOperation {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// No reply arrived within the configured timeout.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    /// The remote explicitly rejected the call.
    #[error("{name}: {message}")]
    Remote { name: String, message: String },

    /// A reply did not have the expected shape.
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    /// The object does not expose the requested property.
    #[error("property {interface}.{property} not found")]
    PropertyNotFound { interface: String, property: String },

    /// A write used a value of the wrong type.
    #[error("property {interface}.{property} expects '{expected}', got '{found}'")]
    TypeMismatch {
        interface: String,
        property: String,
        expected: VariantKind,
        found: VariantKind,
    },

    /// A write targeted a read-only property.
    #[error("property {interface}.{property} is read-only")]
    ReadOnly { interface: String, property: String },

    /// A read returned a value of an unexpected type.
    #[error("cannot decode {interface}.{property}: expected '{expected}', found '{found}'")]
    Decode {
        interface: String,
        property: String,
        expected: VariantKind,
        found: VariantKind,
    },

    /// The adapter path pattern is not a valid regular expression.
    #[error("invalid adapter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A profile UUID is not a valid UUID.
    #[error("invalid profile UUID: {0}")]
    InvalidUuid(String),

    /// A string is not a valid D-Bus object path.
    #[error("invalid object path: {0}")]
    InvalidObjectPath(String),

    /// Arguments the transport cannot encode.
    #[error("unsupported arguments: {0}")]
    UnsupportedArguments(String),
}

impl BluezError {
    /// Returns `true` for [`BluezError::PropertyNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }

    /// Returns `true` for [`BluezError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` for errors caused by caller input rather than the bus.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern(_) | Self::InvalidUuid(_) | Self::InvalidObjectPath(_)
        )
    }
}

/// A point-in-time summary of one adapter.
///
/// Built from a single `GetAll`; properties the adapter did not report are
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterInfo {
    pub path: OwnedObjectPath,
    pub address: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub class: Option<DeviceClass>,
    pub powered: Option<bool>,
    pub discoverable: Option<bool>,
    pub discoverable_timeout: Option<u32>,
    pub pairable: Option<bool>,
    pub pairable_timeout: Option<u32>,
    pub discovering: Option<bool>,
    pub modalias: Option<String>,
    pub uuids: Vec<String>,
}

impl AdapterInfo {
    pub(crate) fn from_snapshot(path: OwnedObjectPath, props: &PropertySnapshot) -> Self {
        Self {
            path,
            address: props.get_as(ap::ADDRESS),
            name: props.get_as(ap::NAME),
            alias: props.get_as(ap::ALIAS),
            class: props.get_as::<u32>(ap::CLASS).map(DeviceClass::from),
            powered: props.get_as(ap::POWERED),
            discoverable: props.get_as(ap::DISCOVERABLE),
            discoverable_timeout: props.get_as(ap::DISCOVERABLE_TIMEOUT),
            pairable: props.get_as(ap::PAIRABLE),
            pairable_timeout: props.get_as(ap::PAIRABLE_TIMEOUT),
            discovering: props.get_as(ap::DISCOVERING),
            modalias: props.get_as(ap::MODALIAS),
            uuids: props.get_as(ap::UUIDS).unwrap_or_default(),
        }
    }
}

/// A point-in-time summary of one remote device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub path: OwnedObjectPath,
    pub adapter: Option<OwnedObjectPath>,
    pub address: Option<String>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub icon: Option<String>,
    pub class: Option<DeviceClass>,
    pub appearance: Option<u16>,
    pub paired: Option<bool>,
    pub trusted: Option<bool>,
    pub blocked: Option<bool>,
    pub connected: Option<bool>,
    pub legacy_pairing: Option<bool>,
    pub rssi: Option<i16>,
    pub modalias: Option<String>,
    pub uuids: Vec<String>,
}

impl DeviceInfo {
    pub(crate) fn from_snapshot(path: OwnedObjectPath, props: &PropertySnapshot) -> Self {
        Self {
            path,
            adapter: props.get_as(dp::ADAPTER),
            address: props.get_as(dp::ADDRESS),
            name: props.get_as(dp::NAME),
            alias: props.get_as(dp::ALIAS),
            icon: props.get_as(dp::ICON),
            class: props.get_as::<u32>(dp::CLASS).map(DeviceClass::from),
            appearance: props.get_as(dp::APPEARANCE),
            paired: props.get_as(dp::PAIRED),
            trusted: props.get_as(dp::TRUSTED),
            blocked: props.get_as(dp::BLOCKED),
            connected: props.get_as(dp::CONNECTED),
            legacy_pairing: props.get_as(dp::LEGACY_PAIRING),
            rssi: props.get_as(dp::RSSI),
            modalias: props.get_as(dp::MODALIAS),
            uuids: props.get_as(dp::UUIDS).unwrap_or_default(),
        }
    }

    /// The name to show a user: alias, then name, then address.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.name.as_deref())
            .or(self.address.as_deref())
            .unwrap_or("<unknown>")
    }
}

fn yes_no(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

fn or_dash(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("-")
}

impl Display for AdapterInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.path.as_str())?;
        writeln!(f, "  Name: {}", or_dash(&self.name))?;
        writeln!(f, "  Address: {}", or_dash(&self.address))?;
        writeln!(f, "  Alias: {}", or_dash(&self.alias))?;
        match &self.class {
            Some(class) => writeln!(f, "  Class: {class}")?,
            None => writeln!(f, "  Class: -")?,
        }
        writeln!(f, "  Powered: {}", yes_no(self.powered))?;
        writeln!(f, "  Discoverable: {}", yes_no(self.discoverable))?;
        writeln!(f, "  Pairable: {}", yes_no(self.pairable))?;
        writeln!(f, "  Discovering: {}", yes_no(self.discovering))?;
        write!(f, "  UUIDs: [{}]", self.uuids.join(", "))
    }
}

impl Display for DeviceInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} [{}]", self.display_name(), or_dash(&self.address))?;
        writeln!(f, "  Path: {}", self.path.as_str())?;
        if let Some(adapter) = &self.adapter {
            writeln!(f, "  Adapter: {}", adapter.as_str())?;
        }
        if let Some(class) = &self.class {
            writeln!(f, "  Class: {class}")?;
        }
        if let Some(icon) = &self.icon {
            writeln!(f, "  Icon: {icon}")?;
        }
        writeln!(f, "  Paired: {}", yes_no(self.paired))?;
        writeln!(f, "  Trusted: {}", yes_no(self.trusted))?;
        writeln!(f, "  Blocked: {}", yes_no(self.blocked))?;
        writeln!(f, "  Connected: {}", yes_no(self.connected))?;
        if let Some(rssi) = self.rssi {
            writeln!(f, "  RSSI: {rssi} dBm")?;
        }
        write!(f, "  UUIDs: [{}]", self.uuids.join(", "))
    }
}
