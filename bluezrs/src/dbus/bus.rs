//! [`Transport`] over a live `zbus` connection.
//!
//! Every round trip goes through a typed proxy: the standard
//! `ObjectManager` and `Properties` proxies from [`zbus::fdo`], and the
//! BlueZ method proxies in this module's siblings. zbus is async; each call
//! is driven to completion on the calling thread with
//! `futures::executor::block_on`, racing the reply against a
//! `futures_timer::Delay` when a timeout is configured.

use futures::executor::block_on;
use futures::{FutureExt, select};
use futures_timer::Delay;
use log::{debug, warn};
use std::collections::HashMap;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use zbus::fdo::{self, ObjectManagerProxy, PropertiesProxy};
use zbus::names::{BusName, InterfaceName};
use zbus::{Connection, DBusError};
use zvariant::{ObjectPath, OwnedValue};

use crate::Result;
use crate::api::models::{BluezError, BusType};
use crate::dbus::{BluezAdapterProxy, BluezDeviceProxy};
use crate::dbus::transport::{ManagedObjects, PropertyMap, Transport};
use crate::types::constants::{interface, method};
use crate::types::variant::Variant;

/// A [`Transport`] backed by a `zbus::Connection`.
///
/// Cloning is cheap and every clone shares the same underlying connection.
#[derive(Debug, Clone)]
pub struct DbusTransport {
    conn: Connection,
    bus: BusType,
}

impl DbusTransport {
    /// Opens a connection to the given bus.
    pub fn connect(bus: BusType) -> Result<Self> {
        let conn = block_on(async {
            match bus {
                BusType::System => Connection::system().await,
                BusType::Session => Connection::session().await,
            }
        })
        .map_err(|source| BluezError::Connection { bus, source })?;

        debug!("Connected to the {bus} bus");
        Ok(Self { conn, bus })
    }

    /// Wraps an already established connection.
    pub fn from_connection(conn: Connection, bus: BusType) -> Self {
        Self { conn, bus }
    }

    /// The underlying zbus connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn object_manager(&self, service: &str, root: &str) -> Result<ObjectManagerProxy<'static>> {
        let (service, root) = target(service, root)?;
        let proxy = block_on(
            ObjectManagerProxy::builder(&self.conn)
                .destination(service)?
                .path(root)?
                .build(),
        )?;
        Ok(proxy)
    }

    fn properties(&self, service: &str, path: &str) -> Result<PropertiesProxy<'static>> {
        let (service, path) = target(service, path)?;
        let proxy = block_on(
            PropertiesProxy::builder(&self.conn)
                .destination(service)?
                .path(path)?
                .build(),
        )?;
        Ok(proxy)
    }

    fn adapter(&self, service: &str, path: &str) -> Result<BluezAdapterProxy<'static>> {
        let (service, path) = target(service, path)?;
        let proxy = block_on(
            BluezAdapterProxy::builder(&self.conn)
                .destination(service)?
                .path(path)?
                .build(),
        )?;
        Ok(proxy)
    }

    fn device(&self, service: &str, path: &str) -> Result<BluezDeviceProxy<'static>> {
        let (service, path) = target(service, path)?;
        let proxy = block_on(
            BluezDeviceProxy::builder(&self.conn)
                .destination(service)?
                .path(path)?
                .build(),
        )?;
        Ok(proxy)
    }
}

/// Validates a (service, object path) pair for proxy construction.
fn target(service: &str, path: &str) -> Result<(BusName<'static>, ObjectPath<'static>)> {
    let service = BusName::try_from(service.to_owned()).map_err(zbus::Error::from)?;
    let path = ObjectPath::try_from(path.to_owned()).map_err(zbus::Error::from)?;
    Ok((service, path))
}

fn interface_name(name: &str) -> Result<InterfaceName<'static>> {
    Ok(InterfaceName::try_from(name.to_owned()).map_err(zbus::Error::from)?)
}

/// Blocks on `call`, giving up after `timeout`.
///
/// The call's own result is handed back untouched; only expiry is turned
/// into an error here.
fn wait<F: Future>(operation: &str, timeout: Option<Duration>, call: F) -> Result<F::Output> {
    debug!("Calling {operation}");
    let outcome = block_on(async {
        let Some(limit) = timeout else {
            return Some(call.await);
        };

        let mut call = pin!(call.fuse());
        let mut delay = Delay::new(limit).fuse();
        select! {
            reply = call => Some(reply),
            _ = delay => None,
        }
    });

    outcome.ok_or_else(|| {
        warn!("{operation} timed out after {timeout:?}");
        BluezError::Timeout {
            operation: operation.to_string(),
            timeout: timeout.unwrap_or_default(),
        }
    })
}

/// Splits explicit rejections by the remote from transport failures.
fn call_error(operation: &str, err: zbus::Error) -> BluezError {
    match err {
        zbus::Error::MethodError(name, message, _) => BluezError::Remote {
            name: name.to_string(),
            message: message.unwrap_or_default(),
        },
        zbus::Error::FDO(err) => fdo_error(operation, *err),
        source => BluezError::DbusOperation {
            context: format!("{operation} failed"),
            source,
        },
    }
}

/// Errors from the standard `org.freedesktop.DBus.*` proxies.
fn fdo_error(operation: &str, err: fdo::Error) -> BluezError {
    match err {
        fdo::Error::ZBus(source) => call_error(operation, source),
        other => BluezError::Remote {
            name: other.name().to_string(),
            message: other.description().unwrap_or_default().to_string(),
        },
    }
}

/// `Properties.Get` errors: a missing property is a normal outcome.
fn property_error(operation: &str, iface: &str, property: &str, err: fdo::Error) -> BluezError {
    match err {
        fdo::Error::UnknownProperty(_) | fdo::Error::InvalidArgs(_) => {
            BluezError::PropertyNotFound {
                interface: iface.to_string(),
                property: property.to_string(),
            }
        }
        other => fdo_error(operation, other),
    }
}

fn into_property_map(raw: HashMap<String, OwnedValue>) -> PropertyMap {
    raw.into_iter().map(|(k, v)| (k, Variant::from(v))).collect()
}

impl Transport for DbusTransport {
    fn bus(&self) -> BusType {
        self.bus
    }

    fn managed_objects(
        &self,
        service: &str,
        root: &str,
        timeout: Option<Duration>,
    ) -> Result<ManagedObjects> {
        let operation = format!(
            "{}.{} on {root}",
            interface::OBJECT_MANAGER,
            method::GET_MANAGED_OBJECTS
        );
        let proxy = self.object_manager(service, root)?;
        let raw = wait(&operation, timeout, proxy.get_managed_objects())?
            .map_err(|e| fdo_error(&operation, e))?;

        // The wire dictionary carries no meaningful order; sort so identical
        // bus states give identical snapshots.
        let mut objects: ManagedObjects = raw
            .into_iter()
            .map(|(path, ifaces)| {
                let mut ifaces: Vec<(String, PropertyMap)> = ifaces
                    .into_iter()
                    .map(|(name, props)| (name.to_string(), into_property_map(props)))
                    .collect();
                ifaces.sort_by(|a, b| a.0.cmp(&b.0));
                (path, ifaces)
            })
            .collect();
        objects.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

        debug!("GetManagedObjects returned {} objects", objects.len());
        Ok(objects)
    }

    fn property_get(
        &self,
        service: &str,
        path: &str,
        iface: &str,
        property: &str,
        timeout: Option<Duration>,
    ) -> Result<Variant> {
        let operation = format!("{}.{} {iface}.{property} on {path}", interface::PROPERTIES, method::GET);
        let proxy = self.properties(service, path)?;
        let name = interface_name(iface)?;

        let value = wait(&operation, timeout, proxy.get(name, property))?
            .map_err(|e| property_error(&operation, iface, property, e))?;
        Ok(Variant::from(value))
    }

    fn property_get_all(
        &self,
        service: &str,
        path: &str,
        iface: &str,
        timeout: Option<Duration>,
    ) -> Result<PropertyMap> {
        let operation = format!("{}.{} {iface} on {path}", interface::PROPERTIES, method::GET_ALL);
        let proxy = self.properties(service, path)?;
        let name = interface_name(iface)?;

        let raw = wait(&operation, timeout, proxy.get_all(name))?
            .map_err(|e| fdo_error(&operation, e))?;
        Ok(into_property_map(raw))
    }

    fn property_set(
        &self,
        service: &str,
        path: &str,
        iface: &str,
        property: &str,
        value: &Variant,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let wire = value.to_value().ok_or_else(|| {
            BluezError::UnsupportedArguments(format!(
                "cannot write a '{}' value to {iface}.{property}",
                value.kind()
            ))
        })?;

        let operation = format!("{}.{} {iface}.{property} on {path}", interface::PROPERTIES, method::SET);
        let proxy = self.properties(service, path)?;
        let name = interface_name(iface)?;

        wait(&operation, timeout, proxy.set(name, property, wire))?
            .map_err(|e| fdo_error(&operation, e))
    }

    fn method_call(
        &self,
        service: &str,
        path: &str,
        iface: &str,
        member: &str,
        args: &[Variant],
        timeout: Option<Duration>,
    ) -> Result<Option<Variant>> {
        let operation = format!("{iface}.{member} on {path}");

        let reply = match (iface, member, args) {
            (interface::ADAPTER, method::REMOVE_DEVICE, [Variant::ObjectPath(device)]) => {
                let proxy = self.adapter(service, path)?;
                wait(&operation, timeout, proxy.remove_device(device))?
            }
            (interface::ADAPTER, method::START_DISCOVERY, []) => {
                let proxy = self.adapter(service, path)?;
                wait(&operation, timeout, proxy.start_discovery())?
            }
            (interface::ADAPTER, method::STOP_DISCOVERY, []) => {
                let proxy = self.adapter(service, path)?;
                wait(&operation, timeout, proxy.stop_discovery())?
            }
            (interface::DEVICE, method::CANCEL_PAIRING, []) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.cancel_pairing())?
            }
            (interface::DEVICE, method::CONNECT, []) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.connect())?
            }
            (interface::DEVICE, method::CONNECT_PROFILE, [Variant::Str(uuid)]) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.connect_profile(uuid))?
            }
            (interface::DEVICE, method::DISCONNECT, []) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.disconnect())?
            }
            (interface::DEVICE, method::DISCONNECT_PROFILE, [Variant::Str(uuid)]) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.disconnect_profile(uuid))?
            }
            (interface::DEVICE, method::PAIR, []) => {
                let proxy = self.device(service, path)?;
                wait(&operation, timeout, proxy.pair())?
            }
            _ => return Err(unsupported_call(iface, member, args)),
        };

        reply.map_err(|e| call_error(&operation, e))?;
        Ok(None)
    }
}

fn unsupported_call(iface: &str, member: &str, args: &[Variant]) -> BluezError {
    let kinds: Vec<String> = args.iter().map(|v| v.kind().to_string()).collect();
    BluezError::UnsupportedArguments(format!("{iface}.{member}({})", kinds.join(", ")))
}
