//! A Rust library for browsing and driving BlueZ over D-Bus.
//!
//! This crate provides a blocking API over the BlueZ object tree:
//!
//! - Fetching a snapshot of every object BlueZ exports
//! - Finding adapters by name or address, and devices by adapter path
//! - Typed access to `org.bluez.Adapter1` and `org.bluez.Device1`
//!   properties and methods
//! - Generic, schema-checked property access for any interface
//!
//! # Example
//!
//! ```no_run
//! use bluezrs::Bluez;
//!
//! # fn example() -> bluezrs::Result<()> {
//! let bluez = Bluez::new()?;
//!
//! // First adapter whose name or address contains "hci0"
//! if let Some(adapter) = bluez.find_adapter(Some("hci0"))? {
//!     adapter.set_alias("workbench")?;
//!     println!("{}", adapter.info()?);
//! }
//!
//! // Devices seen through hci0
//! for device in bluez.devices("hci0$")? {
//!     println!("{}", device.info()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Snapshots
//!
//! Queries such as [`Bluez::find_adapter`] fetch the whole object tree in one
//! `GetManagedObjects` round trip and work on that snapshot. Nothing is kept
//! afterwards: the next query fetches again, and proxies read and write
//! properties on the bus every time. There is no signal subscription.
//!
//! # Error Handling
//!
//! All operations return `Result<T, BluezError>`. An object that does not
//! exist is not an error (`Ok(None)` or an empty list); a property that does
//! not exist is [`BluezError::PropertyNotFound`]. Every round trip is bounded
//! by [`BluezConfig::call_timeout`] and nothing is retried.
//!
//! # Testing Without a Bus
//!
//! All bus access goes through the [`Transport`] trait. Pass your own
//! implementation to [`Bluez::with_transport`] to run against an in-memory
//! object tree.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Building blocks
pub mod core;
pub mod dbus;
pub mod types;

// Public API modules
pub mod api;

// Re-exported public API
pub use crate::api::adapter::Adapter;
pub use crate::api::bluez::Bluez;
pub use crate::api::device::Device;
pub use crate::api::models::{AdapterInfo, BluezConfig, BluezError, BusType, DeviceInfo};
pub use crate::core::object_tree::{ObjectKind, ObjectTree, RemoteObject};
pub use crate::core::properties::{PropertyCache, PropertySnapshot};
pub use crate::dbus::{DbusTransport, ManagedObjects, PropertyMap, Transport};
pub use crate::types::class::{DeviceClass, MajorClass, ServiceClasses};
pub use crate::types::schema::{Access, PropertyDecl};
pub use crate::types::variant::{FromVariant, Variant, VariantKind};

/// A specialized `Result` type for BlueZ operations.
pub type Result<T> = std::result::Result<T, BluezError>;
