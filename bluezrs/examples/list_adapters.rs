/// Lists every Bluetooth adapter BlueZ knows about.
///
/// Pass a name or address fragment to show only the first matching adapter:
///
/// ```text
/// cargo run --example list_adapters -- hci1
/// ```
use bluezrs::{Bluez, BluezConfig};
use std::time::Duration;

fn main() -> bluezrs::Result<()> {
    let config = BluezConfig::new().with_call_timeout(Duration::from_secs(5));
    let bluez = Bluez::with_config(config)?;

    if let Some(pattern) = std::env::args().nth(1) {
        match bluez.find_adapter(Some(&pattern))? {
            Some(adapter) => println!("{}", adapter.info()?),
            None => println!("No adapter matches '{pattern}'"),
        }
        return Ok(());
    }

    let adapters = bluez.adapters()?;
    if adapters.is_empty() {
        println!("No adapters found");
    }
    for adapter in adapters {
        println!("{}", adapter.info()?);

        // Not every controller reports a modalias
        match adapter.modalias() {
            Ok(modalias) => println!("  Modalias: {modalias}"),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
