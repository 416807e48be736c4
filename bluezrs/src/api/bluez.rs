use log::debug;
use regex::Regex;
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::adapter::Adapter;
use crate::api::device::Device;
use crate::api::models::{BluezConfig, BluezError};
use crate::core::directory;
use crate::core::object_tree::ObjectTree;
use crate::core::properties::PropertyCache;
use crate::dbus::{DbusTransport, Transport};

/// Entry point to the BlueZ object directory.
///
/// Holds one transport handle and the settings every round trip uses. Each
/// query fetches a fresh [`ObjectTree`]; nothing is remembered between
/// calls, so results reflect the bus at the time of the call.
///
/// # Example
///
/// ```no_run
/// use bluezrs::Bluez;
///
/// # fn example() -> bluezrs::Result<()> {
/// let bluez = Bluez::new()?;
///
/// let Some(adapter) = bluez.find_adapter(None)? else {
///     println!("no adapter");
///     return Ok(());
/// };
/// println!("using {}", adapter.name()?);
///
/// for device in bluez.devices("hci0")? {
///     println!("{} {}", device.address()?, device.alias()?);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `Bluez` is `Clone`; clones share the transport. Calls block the calling
/// thread and may be issued from several threads at once.
#[derive(Debug, Clone)]
pub struct Bluez {
    transport: Arc<dyn Transport>,
    config: BluezConfig,
}

impl Bluez {
    /// Connects to BlueZ on the system bus with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(BluezConfig::default())
    }

    /// Connects with custom settings.
    pub fn with_config(config: BluezConfig) -> Result<Self> {
        let transport = DbusTransport::connect(config.bus)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Uses an existing transport. `config.bus` is ignored in favor of the
    /// transport's own bus.
    pub fn with_transport(transport: Arc<dyn Transport>, config: BluezConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &BluezConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Fetches a snapshot of every object BlueZ exports.
    pub fn managed_objects(&self) -> Result<ObjectTree> {
        ObjectTree::fetch(
            self.transport.as_ref(),
            &self.config.service,
            &self.config.root,
            self.config.call_timeout,
        )
    }

    /// Finds the first adapter whose name or address contains `pattern`,
    /// ignoring case.
    ///
    /// `None` or an empty pattern returns the first adapter. No match is
    /// `Ok(None)`.
    pub fn find_adapter(&self, pattern: Option<&str>) -> Result<Option<Adapter>> {
        let tree = self.managed_objects()?;
        let found = directory::find_adapter(&tree, pattern)
            .map(|obj| self.bind_adapter(obj.path().clone()));

        if let Some(adapter) = &found {
            debug!("Found adapter {}", adapter.path().as_str());
        }
        Ok(found)
    }

    /// Every adapter, in snapshot order.
    pub fn adapters(&self) -> Result<Vec<Adapter>> {
        let tree = self.managed_objects()?;
        Ok(directory::adapter_paths(&tree)
            .into_iter()
            .map(|p| self.bind_adapter(p))
            .collect())
    }

    /// Every device whose adapter path matches the regular expression
    /// `pattern`, in snapshot order.
    ///
    /// # Errors
    ///
    /// [`BluezError::InvalidPattern`] if `pattern` does not compile; the bus
    /// is not contacted in that case.
    pub fn devices(&self, pattern: &str) -> Result<Vec<Device>> {
        let re = Regex::new(pattern)?;
        let tree = self.managed_objects()?;
        let devices: Vec<Device> = directory::device_paths(&tree, &re)
            .into_iter()
            .map(|p| self.bind_device(p))
            .collect();

        debug!("{} devices match '{pattern}'", devices.len());
        Ok(devices)
    }

    /// Binds an adapter proxy to `path` without contacting the bus.
    pub fn adapter(&self, path: &str) -> Result<Adapter> {
        Ok(self.bind_adapter(object_path(path)?))
    }

    /// Binds a device proxy to `path` without contacting the bus.
    pub fn device(&self, path: &str) -> Result<Device> {
        Ok(self.bind_device(object_path(path)?))
    }

    fn cache(&self, path: OwnedObjectPath) -> PropertyCache {
        PropertyCache::new(
            Arc::clone(&self.transport),
            self.config.service.clone(),
            path,
            self.config.call_timeout,
        )
    }

    fn bind_adapter(&self, path: OwnedObjectPath) -> Adapter {
        Adapter::new(self.cache(path))
    }

    fn bind_device(&self, path: OwnedObjectPath) -> Device {
        Device::new(self.cache(path))
    }
}

fn object_path(path: &str) -> Result<OwnedObjectPath> {
    OwnedObjectPath::try_from(path).map_err(|_| BluezError::InvalidObjectPath(path.to_string()))
}
