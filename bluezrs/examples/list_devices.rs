/// Lists devices seen through adapters whose path matches a regex.
///
/// ```text
/// cargo run --example list_devices -- 'hci0$'
/// ```
use bluezrs::{Bluez, ObjectKind};

fn main() -> bluezrs::Result<()> {
    let pattern = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let bluez = Bluez::new()?;

    let tree = bluez.managed_objects()?;
    let adapters = tree
        .kinds()
        .filter(|k| matches!(k, ObjectKind::Adapter(_)))
        .count();
    println!("{} objects, {adapters} adapters", tree.len());

    let devices = bluez.devices(&pattern)?;
    println!("{} devices on adapters matching '{pattern}':\n", devices.len());
    for device in devices {
        println!("{}\n", device.info()?);
    }

    Ok(())
}
