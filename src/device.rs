//! Compute device descriptor
//!
//! The core never interprets the device; it is an opaque tag the caller
//! threads through so collaborators (loaders, models) agree on placement.

use serde::{Deserialize, Serialize};

/// Target compute device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Cpu,
    /// An accelerator identified by an opaque label, e.g. "cuda:0".
    Accelerator(String),
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Accelerator(id) => write!(f, "{id}"),
        }
    }
}
