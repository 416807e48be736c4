//! In-memory BlueZ object tree behind the `Transport` trait.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use bluezrs::{
    Bluez, BluezConfig, BluezError, BusType, ManagedObjects, PropertyMap, Transport, Variant,
};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

#[derive(Debug, Default)]
struct State {
    objects: ManagedObjects,
    calls: Vec<String>,
    methods: Vec<(String, String, Vec<Variant>)>,
    time_out_next: bool,
}

/// Serves a fixed object tree and records every round trip.
#[derive(Debug, Default)]
pub struct FakeTransport {
    state: Mutex<State>,
}

impl FakeTransport {
    pub fn new(objects: ManagedObjects) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                objects,
                ..State::default()
            }),
        })
    }

    /// Number of round trips made so far.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Method invocations as (path, method, args).
    pub fn methods(&self) -> Vec<(String, String, Vec<Variant>)> {
        self.state.lock().unwrap().methods.clone()
    }

    /// Makes the next round trip time out without touching any state.
    pub fn time_out_next(&self) {
        self.state.lock().unwrap().time_out_next = true;
    }

    /// Reads a property straight from the fake tree, bypassing call counting.
    pub fn peek(&self, path: &str, interface: &str, property: &str) -> Option<Variant> {
        let state = self.state.lock().unwrap();
        find(&state.objects, path, interface).and_then(|props| props.get(property).cloned())
    }

    fn begin(&self, call: String, timeout: Option<Duration>) -> Result<std::sync::MutexGuard<'_, State>, BluezError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        if std::mem::take(&mut state.time_out_next) {
            return Err(BluezError::Timeout {
                operation: call,
                timeout: timeout.unwrap_or_default(),
            });
        }
        Ok(state)
    }
}

fn find<'a>(objects: &'a ManagedObjects, path: &str, interface: &str) -> Option<&'a PropertyMap> {
    objects
        .iter()
        .find(|(p, _)| p.as_str() == path)
        .and_then(|(_, ifaces)| ifaces.iter().find(|(name, _)| name == interface))
        .map(|(_, props)| props)
}

fn find_mut<'a>(
    objects: &'a mut ManagedObjects,
    path: &str,
    interface: &str,
) -> Option<&'a mut PropertyMap> {
    objects
        .iter_mut()
        .find(|(p, _)| p.as_str() == path)
        .and_then(|(_, ifaces)| ifaces.iter_mut().find(|(name, _)| name == interface))
        .map(|(_, props)| props)
}

fn unknown_object(path: &str) -> BluezError {
    BluezError::Remote {
        name: "org.freedesktop.DBus.Error.UnknownObject".into(),
        message: format!("no object at {path}"),
    }
}

impl Transport for FakeTransport {
    fn bus(&self) -> BusType {
        BusType::Session
    }

    fn managed_objects(
        &self,
        _service: &str,
        _root: &str,
        timeout: Option<Duration>,
    ) -> bluezrs::Result<ManagedObjects> {
        let state = self.begin("GetManagedObjects".into(), timeout)?;
        Ok(state.objects.clone())
    }

    fn property_get(
        &self,
        _service: &str,
        path: &str,
        interface: &str,
        property: &str,
        timeout: Option<Duration>,
    ) -> bluezrs::Result<Variant> {
        let state = self.begin(format!("Get {path} {interface}.{property}"), timeout)?;
        let props = find(&state.objects, path, interface).ok_or_else(|| unknown_object(path))?;
        props
            .get(property)
            .cloned()
            .ok_or_else(|| BluezError::PropertyNotFound {
                interface: interface.into(),
                property: property.into(),
            })
    }

    fn property_get_all(
        &self,
        _service: &str,
        path: &str,
        interface: &str,
        timeout: Option<Duration>,
    ) -> bluezrs::Result<PropertyMap> {
        let state = self.begin(format!("GetAll {path} {interface}"), timeout)?;
        find(&state.objects, path, interface)
            .cloned()
            .ok_or_else(|| unknown_object(path))
    }

    fn property_set(
        &self,
        _service: &str,
        path: &str,
        interface: &str,
        property: &str,
        value: &Variant,
        timeout: Option<Duration>,
    ) -> bluezrs::Result<()> {
        let mut state = self.begin(format!("Set {path} {interface}.{property}"), timeout)?;
        let props =
            find_mut(&mut state.objects, path, interface).ok_or_else(|| unknown_object(path))?;
        props.insert(property.to_string(), value.clone());
        Ok(())
    }

    fn method_call(
        &self,
        _service: &str,
        path: &str,
        interface: &str,
        method: &str,
        args: &[Variant],
        timeout: Option<Duration>,
    ) -> bluezrs::Result<Option<Variant>> {
        let mut state = self.begin(format!("{interface}.{method} {path}"), timeout)?;
        state
            .methods
            .push((path.to_string(), method.to_string(), args.to_vec()));
        Ok(None)
    }
}

pub fn path(s: &str) -> OwnedObjectPath {
    OwnedObjectPath::try_from(s).unwrap()
}

pub fn adapter(p: &str, name: &str, address: &str) -> (OwnedObjectPath, Vec<(String, PropertyMap)>) {
    let mut props = PropertyMap::new();
    props.insert("Address".into(), Variant::from(address));
    props.insert("Name".into(), Variant::from(name));
    props.insert("Alias".into(), Variant::from(name));
    props.insert("Powered".into(), Variant::from(true));
    props.insert("Discoverable".into(), Variant::from(false));
    props.insert("DiscoverableTimeout".into(), Variant::UInt32(180));
    props.insert("Class".into(), Variant::UInt32(0x0c010c));
    props.insert(
        "UUIDs".into(),
        Variant::from(vec!["0000110e-0000-1000-8000-00805f9b34fb".to_string()]),
    );
    (
        path(p),
        vec![
            ("org.bluez.Adapter1".into(), props),
            ("org.freedesktop.DBus.Introspectable".into(), PropertyMap::new()),
        ],
    )
}

pub fn device(
    p: &str,
    adapter: &str,
    address: &str,
    alias: &str,
) -> (OwnedObjectPath, Vec<(String, PropertyMap)>) {
    let mut props = PropertyMap::new();
    props.insert("Adapter".into(), Variant::from(path(adapter)));
    props.insert("Address".into(), Variant::from(address));
    props.insert("Alias".into(), Variant::from(alias));
    props.insert("Paired".into(), Variant::from(false));
    props.insert("Trusted".into(), Variant::from(false));
    props.insert("RSSI".into(), Variant::Int16(-60));
    (path(p), vec![("org.bluez.Device1".into(), props)])
}

/// Two adapters and three devices split across them.
pub fn sample_tree() -> ManagedObjects {
    vec![
        (
            path("/org/bluez"),
            vec![("org.bluez.AgentManager1".into(), PropertyMap::new())],
        ),
        adapter("/org/bluez/hci0", "hci0-adapter", "00:11:22:33:44:55"),
        device(
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_01",
            "/org/bluez/hci0",
            "AA:AA:AA:AA:AA:01",
            "Headphones",
        ),
        device(
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_02",
            "/org/bluez/hci0",
            "AA:AA:AA:AA:AA:02",
            "Keyboard",
        ),
        adapter("/org/bluez/hci1", "MyDongle", "AA:BB:CC:DD:EE:FF"),
        device(
            "/org/bluez/hci1/dev_BB_BB_BB_BB_BB_01",
            "/org/bluez/hci1",
            "BB:BB:BB:BB:BB:01",
            "Phone",
        ),
    ]
}

pub fn bluez(transport: &Arc<FakeTransport>) -> Bluez {
    let transport: Arc<dyn Transport> = transport.clone();
    Bluez::with_transport(transport, BluezConfig::new().with_bus(BusType::Session))
}
