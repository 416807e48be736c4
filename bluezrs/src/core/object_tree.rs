//! Object tree snapshots and interface-driven type dispatch.
//!
//! An [`ObjectTree`] is what one `GetManagedObjects` round trip returned,
//! flattened into an ordered list of [`RemoteObject`]s. It is read-only and
//! stale as soon as anything changes on the bus; callers that need fresh
//! data fetch a new one.

use log::debug;
use std::collections::HashSet;
use std::time::Duration;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::BluezError;
use crate::core::properties::PropertySnapshot;
use crate::dbus::{ManagedObjects, Transport};
use crate::types::constants::interface;

/// What kind of BlueZ object a remote object is, decided by its interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// No recognized interface.
    Unknown,
    /// Implements `org.bluez.Adapter1`.
    Adapter(OwnedObjectPath),
    /// Implements `org.bluez.Device1`.
    Device(OwnedObjectPath),
}

impl ObjectKind {
    /// Classifies an object from the names of the interfaces it implements.
    ///
    /// BlueZ never puts both interfaces on one object; if a remote did, the
    /// adapter interface takes precedence.
    pub fn classify<'a>(
        path: &OwnedObjectPath,
        interfaces: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut kind = Self::Unknown;
        for name in interfaces {
            match name {
                interface::ADAPTER => return Self::Adapter(path.clone()),
                interface::DEVICE => kind = Self::Device(path.clone()),
                _ => {}
            }
        }
        kind
    }

    pub fn is_adapter(&self) -> bool {
        matches!(self, Self::Adapter(_))
    }

    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

/// One remote object: its path and every interface it implements.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    path: OwnedObjectPath,
    interfaces: Vec<(String, PropertySnapshot)>,
}

impl RemoteObject {
    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    /// Interface names in the order the transport reported them.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.iter().map(|(name, _)| name.as_str())
    }

    /// Interfaces with their property snapshots.
    pub fn interfaces(&self) -> impl Iterator<Item = (&str, &PropertySnapshot)> {
        self.interfaces.iter().map(|(name, props)| (name.as_str(), props))
    }

    pub fn has_interface(&self, name: &str) -> bool {
        self.interfaces.iter().any(|(n, _)| n == name)
    }

    /// Property snapshot of `name`, if this object implements it.
    pub fn properties(&self, name: &str) -> Option<&PropertySnapshot> {
        self.interfaces
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, props)| props)
    }

    pub fn kind(&self) -> ObjectKind {
        ObjectKind::classify(&self.path, self.interface_names())
    }
}

/// An ordered, immutable snapshot of a service's object tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectTree {
    objects: Vec<RemoteObject>,
}

impl ObjectTree {
    /// Fetches the whole object tree of `service` below `root` in one round
    /// trip.
    ///
    /// A transport error or a malformed reply aborts the fetch; nothing is
    /// kept from a failed attempt.
    pub fn fetch(
        transport: &dyn Transport,
        service: &str,
        root: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let raw = transport.managed_objects(service, root, timeout)?;
        Self::from_managed_objects(raw)
    }

    /// Flattens an object-manager reply.
    ///
    /// Every object, interface and property is kept, including interfaces
    /// nothing here recognizes. Order is preserved.
    ///
    /// # Errors
    ///
    /// [`BluezError::MalformedReply`] if an object path appears twice or an
    /// object lists the same interface twice. No partial tree is returned.
    pub fn from_managed_objects(raw: ManagedObjects) -> Result<Self> {
        let mut seen_paths = HashSet::with_capacity(raw.len());
        let mut objects = Vec::with_capacity(raw.len());

        for (path, ifaces) in raw {
            if !seen_paths.insert(path.as_str().to_owned()) {
                return Err(BluezError::MalformedReply(format!(
                    "object {} reported more than once",
                    path.as_str()
                )));
            }

            let mut seen_ifaces = HashSet::with_capacity(ifaces.len());
            let mut interfaces = Vec::with_capacity(ifaces.len());
            for (name, props) in ifaces {
                if !seen_ifaces.insert(name.clone()) {
                    return Err(BluezError::MalformedReply(format!(
                        "interface {name} reported more than once on {}",
                        path.as_str()
                    )));
                }
                interfaces.push((name, PropertySnapshot::new(props)));
            }

            objects.push(RemoteObject { path, interfaces });
        }

        debug!("Built object tree with {} objects", objects.len());
        Ok(Self { objects })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in snapshot order.
    pub fn objects(&self) -> impl Iterator<Item = &RemoteObject> {
        self.objects.iter()
    }

    /// Looks up one object by path.
    pub fn get(&self, path: &str) -> Option<&RemoteObject> {
        self.objects.iter().find(|o| o.path.as_str() == path)
    }

    /// Objects implementing `name`, in snapshot order.
    pub fn with_interface<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RemoteObject> {
        self.objects.iter().filter(move |o| o.has_interface(name))
    }

    /// Every object classified, in snapshot order.
    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.objects.iter().map(RemoteObject::kind)
    }
}
