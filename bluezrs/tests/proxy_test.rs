//! Adapter and device proxies against an in-memory object tree.

mod common;

use bluezrs::{BluezError, Variant, VariantKind};
use common::{FakeTransport, bluez, path, sample_tree};

const HCI0: &str = "/org/bluez/hci0";
const HEADPHONES: &str = "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_01";

#[test]
fn alias_round_trip() {
    let transport = FakeTransport::new(sample_tree());
    let adapter = bluez(&transport).adapter(HCI0).unwrap();

    adapter.set_alias("workbench").unwrap();
    assert_eq!(adapter.alias().unwrap(), "workbench");

    let device = bluez(&transport).device(HEADPHONES).unwrap();
    device.set_alias("Living room").unwrap();
    assert_eq!(device.alias().unwrap(), "Living room");
}

#[test]
fn getters_read_current_values() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let adapter = bluez.adapter(HCI0).unwrap();
    assert_eq!(adapter.address().unwrap(), "00:11:22:33:44:55");
    assert_eq!(adapter.name().unwrap(), "hci0-adapter");
    assert!(adapter.powered().unwrap());
    assert_eq!(adapter.discoverable_timeout().unwrap(), 180);
    assert_eq!(adapter.uuids().unwrap().len(), 1);

    let device = bluez.device(HEADPHONES).unwrap();
    assert_eq!(device.adapter().unwrap(), path(HCI0));
    assert_eq!(device.rssi().unwrap(), -60);
    assert!(!device.paired().unwrap());
}

#[test]
fn missing_property_is_surfaced() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let err = bluez.adapter(HCI0).unwrap().modalias().unwrap_err();
    assert!(err.is_not_found());

    let err = bluez.device(HEADPHONES).unwrap().appearance().unwrap_err();
    assert!(matches!(
        err,
        BluezError::PropertyNotFound { ref property, .. } if property == "Appearance"
    ));
}

#[test]
fn setters_write_through() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let adapter = bluez.adapter(HCI0).unwrap();
    adapter.set_powered(false).unwrap();
    adapter.set_discoverable(true).unwrap();
    adapter.set_pairable_timeout(30).unwrap();
    assert!(!adapter.powered().unwrap());
    assert!(adapter.discoverable().unwrap());
    assert_eq!(adapter.pairable_timeout().unwrap(), 30);

    let device = bluez.device(HEADPHONES).unwrap();
    device.set_trusted(true).unwrap();
    device.set_blocked(true).unwrap();
    assert_eq!(
        transport.peek(HEADPHONES, "org.bluez.Device1", "Trusted"),
        Some(Variant::Bool(true))
    );
    assert!(device.blocked().unwrap());
}

#[test]
fn set_with_wrong_type_is_rejected_locally() {
    let transport = FakeTransport::new(sample_tree());
    let adapter = bluez(&transport).adapter(HCI0).unwrap();

    let err = adapter.set_property("Powered", "yes").unwrap_err();
    assert!(matches!(
        err,
        BluezError::TypeMismatch {
            expected: VariantKind::Bool,
            found: VariantKind::Str,
            ..
        }
    ));
    assert_eq!(transport.call_count(), 0);
    assert!(adapter.powered().unwrap());
}

#[test]
fn set_read_only_or_unknown_property_is_rejected_locally() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let err = bluez
        .adapter(HCI0)
        .unwrap()
        .set_property("Address", "11:22:33:44:55:66")
        .unwrap_err();
    assert!(matches!(err, BluezError::ReadOnly { .. }));

    let err = bluez
        .device(HEADPHONES)
        .unwrap()
        .set_property("Bogus", true)
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(transport.call_count(), 0);
}

#[test]
fn timed_out_set_leaves_value_unchanged() {
    let transport = FakeTransport::new(sample_tree());
    let adapter = bluez(&transport).adapter(HCI0).unwrap();

    transport.time_out_next();
    let err = adapter.set_alias("never").unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(adapter.alias().unwrap(), "hci0-adapter");
}

#[test]
fn mistyped_remote_value_fails_decode() {
    let mut raw = sample_tree();
    let (_, ifaces) = raw
        .iter_mut()
        .find(|(p, _)| p.as_str() == HCI0)
        .unwrap();
    ifaces[0]
        .1
        .insert("Modalias".into(), Variant::Unsupported("a{qv}".into()));
    let transport = FakeTransport::new(raw);
    let adapter = bluez(&transport).adapter(HCI0).unwrap();

    let err = adapter.modalias().unwrap_err();
    assert!(matches!(err, BluezError::Decode { .. }));

    // the bad value does not spoil the rest of the snapshot
    let info = adapter.info().unwrap();
    assert_eq!(info.modalias, None);
    assert_eq!(info.name.as_deref(), Some("hci0-adapter"));
}

#[test]
fn adapter_info_from_one_snapshot() {
    let transport = FakeTransport::new(sample_tree());
    let info = bluez(&transport).adapter(HCI0).unwrap().info().unwrap();

    assert_eq!(transport.call_count(), 1);
    assert_eq!(info.address.as_deref(), Some("00:11:22:33:44:55"));
    assert_eq!(info.powered, Some(true));
    assert_eq!(info.class.map(|c| c.raw), Some(0x0c010c));
}

#[test]
fn device_info_display_name() {
    let transport = FakeTransport::new(sample_tree());
    let info = bluez(&transport)
        .device(HEADPHONES)
        .unwrap()
        .info()
        .unwrap();
    assert_eq!(info.display_name(), "Headphones");
    assert_eq!(info.adapter, Some(path(HCI0)));
}

#[test]
fn adapter_actions_reach_the_bus() {
    let transport = FakeTransport::new(sample_tree());
    let adapter = bluez(&transport).adapter(HCI0).unwrap();

    adapter.start_discovery().unwrap();
    adapter.stop_discovery().unwrap();
    adapter.remove_device(&path(HEADPHONES)).unwrap();

    let methods = transport.methods();
    let names: Vec<&str> = methods.iter().map(|(_, m, _)| m.as_str()).collect();
    assert_eq!(names, vec!["StartDiscovery", "StopDiscovery", "RemoveDevice"]);
    assert_eq!(methods[2].2, vec![Variant::ObjectPath(path(HEADPHONES))]);
}

#[test]
fn device_actions_reach_the_bus() {
    let transport = FakeTransport::new(sample_tree());
    let device = bluez(&transport).device(HEADPHONES).unwrap();

    device.pair().unwrap();
    device.connect().unwrap();
    device
        .connect_profile("0000110B-0000-1000-8000-00805F9B34FB")
        .unwrap();
    device.disconnect().unwrap();
    device.cancel_pairing().unwrap();

    let methods = transport.methods();
    let names: Vec<&str> = methods.iter().map(|(_, m, _)| m.as_str()).collect();
    assert_eq!(
        names,
        vec!["Pair", "Connect", "ConnectProfile", "Disconnect", "CancelPairing"]
    );
    assert_eq!(
        methods[2].2,
        vec![Variant::Str("0000110b-0000-1000-8000-00805f9b34fb".into())]
    );
    assert!(methods.iter().all(|(p, _, _)| p == HEADPHONES));
}

#[test]
fn invalid_profile_uuid_makes_no_round_trip() {
    let transport = FakeTransport::new(sample_tree());
    let device = bluez(&transport).device(HEADPHONES).unwrap();

    assert!(matches!(
        device.disconnect_profile("not-a-uuid"),
        Err(BluezError::InvalidUuid(_))
    ));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn unknown_object_is_a_remote_error() {
    let transport = FakeTransport::new(sample_tree());
    let err = bluez(&transport)
        .device("/org/bluez/hci0/dev_00_00_00_00_00_00")
        .unwrap()
        .name()
        .unwrap_err();
    assert!(matches!(err, BluezError::Remote { .. }));
}
