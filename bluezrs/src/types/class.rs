//! Bluetooth Class of Device decoding.
//!
//! The `Class` property on adapters and devices is the 24-bit Class of
//! Device field from the Bluetooth Assigned Numbers: bits 2..=7 hold the
//! minor class, bits 8..=12 the major class and bits 13..=23 a set of
//! service class flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

bitflags! {
    /// Major service classes advertised in a Class of Device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ServiceClasses: u32 {
        const LIMITED_DISCOVERABLE = 1 << 13;
        const LE_AUDIO = 1 << 14;
        const POSITIONING = 1 << 16;
        const NETWORKING = 1 << 17;
        const RENDERING = 1 << 18;
        const CAPTURING = 1 << 19;
        const OBJECT_TRANSFER = 1 << 20;
        const AUDIO = 1 << 21;
        const TELEPHONY = 1 << 22;
        const INFORMATION = 1 << 23;
    }
}

const SERVICE_NAMES: &[(ServiceClasses, &str)] = &[
    (ServiceClasses::LIMITED_DISCOVERABLE, "limited discoverable"),
    (ServiceClasses::LE_AUDIO, "LE audio"),
    (ServiceClasses::POSITIONING, "positioning"),
    (ServiceClasses::NETWORKING, "networking"),
    (ServiceClasses::RENDERING, "rendering"),
    (ServiceClasses::CAPTURING, "capturing"),
    (ServiceClasses::OBJECT_TRANSFER, "object transfer"),
    (ServiceClasses::AUDIO, "audio"),
    (ServiceClasses::TELEPHONY, "telephony"),
    (ServiceClasses::INFORMATION, "information"),
];

impl ServiceClasses {
    /// Human-readable names of the set flags, lowest bit first.
    pub fn names(&self) -> Vec<&'static str> {
        SERVICE_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Major device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MajorClass {
    Miscellaneous,
    Computer,
    Phone,
    NetworkAccessPoint,
    AudioVideo,
    Peripheral,
    Imaging,
    Wearable,
    Toy,
    Health,
    Uncategorized,
    /// Reserved code not mapped to a specific variant.
    Other(u8),
}

impl From<u8> for MajorClass {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Miscellaneous,
            1 => Self::Computer,
            2 => Self::Phone,
            3 => Self::NetworkAccessPoint,
            4 => Self::AudioVideo,
            5 => Self::Peripheral,
            6 => Self::Imaging,
            7 => Self::Wearable,
            8 => Self::Toy,
            9 => Self::Health,
            31 => Self::Uncategorized,
            v => Self::Other(v),
        }
    }
}

impl Display for MajorClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miscellaneous => write!(f, "Miscellaneous"),
            Self::Computer => write!(f, "Computer"),
            Self::Phone => write!(f, "Phone"),
            Self::NetworkAccessPoint => write!(f, "Network access point"),
            Self::AudioVideo => write!(f, "Audio/Video"),
            Self::Peripheral => write!(f, "Peripheral"),
            Self::Imaging => write!(f, "Imaging"),
            Self::Wearable => write!(f, "Wearable"),
            Self::Toy => write!(f, "Toy"),
            Self::Health => write!(f, "Health"),
            Self::Uncategorized => write!(f, "Uncategorized"),
            Self::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// A decoded Class of Device value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClass {
    pub raw: u32,
    pub major: MajorClass,
    pub minor: u8,
    pub services: ServiceClasses,
}

impl From<u32> for DeviceClass {
    fn from(raw: u32) -> Self {
        Self {
            raw,
            major: MajorClass::from(((raw >> 8) & 0x1f) as u8),
            minor: ((raw >> 2) & 0x3f) as u8,
            services: ServiceClasses::from_bits_truncate(raw),
        }
    }
}

impl Display for DeviceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:06x} ({})", self.raw, self.major)?;
        let names = self.services.names();
        if !names.is_empty() {
            write!(f, " [{}]", names.join(", "))?;
        }
        Ok(())
    }
}
