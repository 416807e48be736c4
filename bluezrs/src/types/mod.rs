//! Type definitions and constants.
//!
//! This module contains BlueZ constants, the [`Variant`](variant::Variant)
//! value model, declared property types and Class of Device decoding.

pub mod class;
pub(crate) mod constants;
pub mod schema;
pub mod variant;
