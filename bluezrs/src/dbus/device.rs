//! BlueZ device proxy.

use zbus::{Result, proxy};

/// Proxy for the methods of `org.bluez.Device1`.
///
/// Every method blocks on the BlueZ side until the operation completes or
/// fails, so replies can take several seconds.
#[proxy(interface = "org.bluez.Device1", default_service = "org.bluez")]
pub trait BluezDevice {
    fn cancel_pairing(&self) -> Result<()>;

    /// Connects all auto-connectable profiles.
    fn connect(&self) -> Result<()>;

    /// Connects the profile identified by `uuid`.
    fn connect_profile(&self, uuid: &str) -> Result<()>;

    fn disconnect(&self) -> Result<()>;

    fn disconnect_profile(&self, uuid: &str) -> Result<()>;

    /// Starts pairing; returns once bonding has finished.
    fn pair(&self) -> Result<()>;
}
