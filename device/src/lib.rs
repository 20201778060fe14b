//! Device identity and hardware limits for the gridwise launch scheduler.
//!
//! - [`DeviceId`] / [`Backend`] address a device (`OPENCL:0:1`).
//! - [`DeviceCapabilities`] describes its vendor, class, and work-item limits.
//! - [`DriverVersion`] orders driver version strings.
//! - [`DeviceRegistry`] holds the snapshot produced by device discovery.

pub mod capabilities;
pub mod driver;
pub mod error;
pub mod id;
pub mod registry;


pub use capabilities::{DeviceCapabilities, DeviceClass, Dims, MAX_DIMS, Vendor};
pub use driver::DriverVersion;
pub use error::{Error, Result};
pub use id::{Backend, DeviceId};
pub use registry::{DeviceRegistry, get_device, registry};
