//! Directory queries against an in-memory object tree.

mod common;

use bluezrs::{BluezError, ObjectKind};
use common::{FakeTransport, bluez, path, sample_tree};

#[test]
fn snapshot_is_stable_across_fetches() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let first = bluez.managed_objects().unwrap();
    let second = bluez.managed_objects().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);

    let order: Vec<&str> = first.objects().map(|o| o.path().as_str()).collect();
    assert_eq!(
        order,
        vec![
            "/org/bluez",
            "/org/bluez/hci0",
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_01",
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_02",
            "/org/bluez/hci1",
            "/org/bluez/hci1/dev_BB_BB_BB_BB_BB_01",
        ]
    );
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn snapshot_keeps_unrecognized_interfaces() {
    let transport = FakeTransport::new(sample_tree());
    let tree = bluez(&transport).managed_objects().unwrap();

    let root = tree.get("/org/bluez").unwrap();
    assert!(root.has_interface("org.bluez.AgentManager1"));
    assert_eq!(root.kind(), ObjectKind::Unknown);

    let hci0 = tree.get("/org/bluez/hci0").unwrap();
    assert!(hci0.has_interface("org.freedesktop.DBus.Introspectable"));
    assert_eq!(hci0.kind(), ObjectKind::Adapter(path("/org/bluez/hci0")));
}

#[test]
fn find_adapter_without_pattern_returns_first() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let adapter = bluez.find_adapter(None).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci0");

    let adapter = bluez.find_adapter(Some("")).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci0");
}

#[test]
fn find_adapter_matches_name_case_insensitively() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let adapter = bluez.find_adapter(Some("hc")).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci0");

    let adapter = bluez.find_adapter(Some("mydongle")).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci1");
}

#[test]
fn find_adapter_skips_earlier_non_matching_adapter() {
    let transport = FakeTransport::new(vec![
        common::adapter("/org/bluez/hci0", "MyDongle", "AA:BB:CC:DD:EE:FF"),
        common::adapter("/org/bluez/hci1", "hci0-adapter", "00:11:22:33:44:55"),
    ]);
    let bluez = bluez(&transport);

    let adapter = bluez.find_adapter(Some("hc")).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci1");

    let adapter = bluez.find_adapter(None).unwrap().unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci0");
}

#[test]
fn find_adapter_falls_back_to_address() {
    let transport = FakeTransport::new(sample_tree());
    let adapter = bluez(&transport)
        .find_adapter(Some("dd:ee"))
        .unwrap()
        .unwrap();
    assert_eq!(adapter.path().as_str(), "/org/bluez/hci1");
}

#[test]
fn find_adapter_without_match_is_none() {
    let transport = FakeTransport::new(sample_tree());
    assert!(bluez(&transport).find_adapter(Some("zz")).unwrap().is_none());

    let empty = FakeTransport::new(Vec::new());
    assert!(bluez(&empty).find_adapter(None).unwrap().is_none());
}

#[test]
fn adapters_in_snapshot_order() {
    let transport = FakeTransport::new(sample_tree());
    let paths: Vec<String> = bluez(&transport)
        .adapters()
        .unwrap()
        .iter()
        .map(|a| a.path().as_str().to_string())
        .collect();
    assert_eq!(paths, vec!["/org/bluez/hci0", "/org/bluez/hci1"]);
}

#[test]
fn devices_filtered_by_adapter_path() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    let hci0: Vec<String> = bluez
        .devices("hci0")
        .unwrap()
        .iter()
        .map(|d| d.path().as_str().to_string())
        .collect();
    assert_eq!(
        hci0,
        vec![
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_01",
            "/org/bluez/hci0/dev_AA_AA_AA_AA_AA_02",
        ]
    );

    let anchored: Vec<String> = bluez
        .devices("^/org/bluez/hci0$")
        .unwrap()
        .iter()
        .map(|d| d.path().as_str().to_string())
        .collect();
    assert_eq!(anchored, hci0);

    assert_eq!(bluez.devices("hci[01]$").unwrap().len(), 3);
    assert!(bluez.devices("hci7").unwrap().is_empty());
}

#[test]
fn invalid_device_pattern_makes_no_round_trip() {
    let transport = FakeTransport::new(sample_tree());
    let err = bluez(&transport).devices("hci(").unwrap_err();

    assert!(matches!(err, BluezError::InvalidPattern(_)));
    assert!(err.is_configuration());
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn fetch_timeout_aborts_query() {
    let transport = FakeTransport::new(sample_tree());
    let bluez = bluez(&transport);

    transport.time_out_next();
    let err = bluez.find_adapter(None).unwrap_err();
    assert!(err.is_timeout());

    // the next call goes through normally
    assert!(bluez.find_adapter(None).unwrap().is_some());
}

#[test]
fn duplicate_objects_are_malformed() {
    let mut raw = sample_tree();
    raw.push(common::adapter("/org/bluez/hci0", "again", "00:00:00:00:00:00"));
    let transport = FakeTransport::new(raw);

    let err = bluez(&transport).adapters().unwrap_err();
    assert!(matches!(err, BluezError::MalformedReply(_)));
}

#[test]
fn invalid_object_path_is_rejected() {
    let transport = FakeTransport::new(sample_tree());
    let err = bluez(&transport).device("not a path").unwrap_err();
    assert!(matches!(err, BluezError::InvalidObjectPath(_)));
    assert_eq!(transport.call_count(), 0);
}
