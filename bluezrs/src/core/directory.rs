//! Queries over an [`ObjectTree`].
//!
//! These are pure functions: they read one snapshot and never touch the bus.
//! [`Bluez`](crate::Bluez) wraps them with a fresh fetch and proxy
//! construction.

use log::debug;
use regex::Regex;
use zvariant::OwnedObjectPath;

use crate::core::object_tree::{ObjectTree, RemoteObject};
use crate::types::constants::{adapter_property, device_property, interface};

/// Finds the first adapter matching `pattern`.
///
/// With no pattern, or an empty one, the first adapter in snapshot order is
/// returned. Otherwise the pattern is lowercased and matched as a substring
/// of each adapter's lowercased `Name`, then of its lowercased `Address`.
/// Adapters whose `Name` or `Address` is missing or not a string simply do
/// not match on that property.
pub fn find_adapter<'a>(tree: &'a ObjectTree, pattern: Option<&str>) -> Option<&'a RemoteObject> {
    let mut adapters = tree.with_interface(interface::ADAPTER);

    let needle = match pattern {
        Some(p) if !p.is_empty() => p.to_ascii_lowercase(),
        _ => return adapters.next(),
    };

    let found = adapters.find(|obj| {
        let Some(props) = obj.properties(interface::ADAPTER) else {
            return false;
        };
        let contains = |prop: &str| {
            props
                .get_as::<String>(prop)
                .is_some_and(|v| v.to_ascii_lowercase().contains(&needle))
        };
        contains(adapter_property::NAME) || contains(adapter_property::ADDRESS)
    });

    if found.is_none() {
        debug!("No adapter matches '{needle}'");
    }
    found
}

/// Paths of every adapter, in snapshot order.
pub fn adapter_paths(tree: &ObjectTree) -> Vec<OwnedObjectPath> {
    tree.with_interface(interface::ADAPTER)
        .map(|obj| obj.path().clone())
        .collect()
}

/// Paths of every device whose `Adapter` property matches `pattern`.
///
/// The regex is searched, not anchored: `hci0` matches `/org/bluez/hci0`.
/// Devices without a readable `Adapter` path are skipped.
pub fn device_paths(tree: &ObjectTree, pattern: &Regex) -> Vec<OwnedObjectPath> {
    tree.with_interface(interface::DEVICE)
        .filter(|obj| {
            obj.properties(interface::DEVICE)
                .and_then(|props| props.get(device_property::ADAPTER))
                .and_then(|v| v.as_object_path())
                .is_some_and(|adapter| pattern.is_match(adapter.as_str()))
        })
        .map(|obj| obj.path().clone())
        .collect()
}
