//! D-Bus access for BlueZ.
//!
//! [`Transport`] describes the round trips the directory needs;
//! [`DbusTransport`] implements them over typed `zbus` proxies.

mod adapter;
mod bus;
mod device;
mod transport;

pub use bus::DbusTransport;
pub use transport::{ManagedObjects, PropertyMap, Transport};

pub(crate) use adapter::BluezAdapterProxy;
pub(crate) use device::BluezDeviceProxy;
