//! Constants for BlueZ D-Bus names and default values.
//!
//! These correspond to the well-known names, object paths and interface
//! identifiers used by BlueZ and the standard D-Bus interfaces it implements.

/// Well-known bus names.
pub mod service {
    /// The BlueZ daemon's bus name.
    pub const BLUEZ: &str = "org.bluez";
}

/// Well-known object paths.
pub mod path {
    /// Root of the BlueZ object tree, where the object manager lives.
    pub const ROOT: &str = "/";
}

/// D-Bus interface names.
pub mod interface {
    /// A local Bluetooth controller (e.g. `hci0`).
    pub const ADAPTER: &str = "org.bluez.Adapter1";
    /// A remote Bluetooth device known to an adapter.
    pub const DEVICE: &str = "org.bluez.Device1";
    pub const OBJECT_MANAGER: &str = "org.freedesktop.DBus.ObjectManager";
    pub const PROPERTIES: &str = "org.freedesktop.DBus.Properties";
}

/// Property names on `org.bluez.Adapter1`.
pub mod adapter_property {
    pub const ADDRESS: &str = "Address";
    pub const ALIAS: &str = "Alias";
    pub const CLASS: &str = "Class";
    pub const DISCOVERABLE: &str = "Discoverable";
    pub const DISCOVERABLE_TIMEOUT: &str = "DiscoverableTimeout";
    pub const DISCOVERING: &str = "Discovering";
    pub const MODALIAS: &str = "Modalias";
    pub const NAME: &str = "Name";
    pub const PAIRABLE: &str = "Pairable";
    pub const PAIRABLE_TIMEOUT: &str = "PairableTimeout";
    pub const POWERED: &str = "Powered";
    pub const UUIDS: &str = "UUIDs";
}

/// Property names on `org.bluez.Device1`.
pub mod device_property {
    pub const ADAPTER: &str = "Adapter";
    pub const ADDRESS: &str = "Address";
    pub const ALIAS: &str = "Alias";
    pub const APPEARANCE: &str = "Appearance";
    pub const BLOCKED: &str = "Blocked";
    pub const CLASS: &str = "Class";
    pub const CONNECTED: &str = "Connected";
    pub const ICON: &str = "Icon";
    pub const LEGACY_PAIRING: &str = "LegacyPairing";
    pub const MODALIAS: &str = "Modalias";
    pub const NAME: &str = "Name";
    pub const PAIRED: &str = "Paired";
    pub const RSSI: &str = "RSSI";
    pub const TRUSTED: &str = "Trusted";
    pub const UUIDS: &str = "UUIDs";
}

/// Remote method names.
pub mod method {
    pub const GET: &str = "Get";
    pub const GET_ALL: &str = "GetAll";
    pub const SET: &str = "Set";
    pub const GET_MANAGED_OBJECTS: &str = "GetManagedObjects";

    pub const REMOVE_DEVICE: &str = "RemoveDevice";
    pub const START_DISCOVERY: &str = "StartDiscovery";
    pub const STOP_DISCOVERY: &str = "StopDiscovery";

    pub const CANCEL_PAIRING: &str = "CancelPairing";
    pub const CONNECT: &str = "Connect";
    pub const CONNECT_PROFILE: &str = "ConnectProfile";
    pub const DISCONNECT: &str = "Disconnect";
    pub const DISCONNECT_PROFILE: &str = "DisconnectProfile";
    pub const PAIR: &str = "Pair";
}

/// Timeout constants for bus round trips.
pub mod timeouts {
    use std::time::Duration;

    /// The reference D-Bus implementation's default reply timeout (25 seconds).
    const DEFAULT_CALL_TIMEOUT_SECS: u64 = 25;

    /// Returns the default per-call timeout.
    pub fn default_call_timeout() -> Duration {
        Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS)
    }
}
