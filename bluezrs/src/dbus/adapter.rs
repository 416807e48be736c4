//! BlueZ adapter proxy.

use zbus::{Result, proxy};
use zvariant::ObjectPath;

/// Proxy for the methods of `org.bluez.Adapter1`.
///
/// Properties are read and written through `org.freedesktop.DBus.Properties`
/// so they can be checked against the declared schema first; only the
/// methods live here.
#[proxy(interface = "org.bluez.Adapter1", default_service = "org.bluez")]
pub trait BluezAdapter {
    /// Removes a remote device and its pairing information.
    fn remove_device(&self, device: &ObjectPath<'_>) -> Result<()>;

    /// Starts device discovery for this client.
    fn start_discovery(&self) -> Result<()>;

    fn stop_discovery(&self) -> Result<()>;
}
