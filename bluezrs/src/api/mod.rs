//! Public API module.
//!
//! [`Bluez`](bluez::Bluez) is the entry point; [`Adapter`](adapter::Adapter)
//! and [`Device`](device::Device) are the typed proxies it hands out.

pub mod adapter;
pub mod bluez;
pub mod device;
pub mod models;
