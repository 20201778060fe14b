//! Device identity.
//!
//! A device is addressed by the code-generation backend that drives it plus the
//! (platform, device) index pair reported by discovery. The textual form is
//! `BACKEND[:PLATFORM]:DEVICE`, e.g. `OPENCL:0:1` or `PTX:0`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidDeviceSnafu, Result};

/// Code-generation backend a device is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    #[strum(serialize = "OPENCL")]
    OpenCl,
    #[strum(serialize = "PTX")]
    Ptx,
    #[strum(serialize = "SPIRV")]
    SpirV,
    #[strum(serialize = "METAL")]
    Metal,
}

impl Backend {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "OPENCL" | "CL" => Some(Self::OpenCl),
            "PTX" | "CUDA" => Some(Self::Ptx),
            "SPIRV" | "SPIR-V" | "LEVELZERO" => Some(Self::SpirV),
            "METAL" => Some(Self::Metal),
            _ => None,
        }
    }
}

/// Identity of a discovered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId {
    pub backend: Backend,
    pub platform: usize,
    pub device: usize,
}

impl DeviceId {
    pub const fn new(backend: Backend, platform: usize, device: usize) -> Self {
        Self { backend, platform, device }
    }

    pub const fn opencl(platform: usize, device: usize) -> Self {
        Self::new(Backend::OpenCl, platform, device)
    }

    pub const fn ptx(device: usize) -> Self {
        Self::new(Backend::Ptx, 0, device)
    }

    /// Parse a device string.
    ///
    /// Examples:
    /// - "OPENCL:0:1" -> OpenCL platform 0, device 1
    /// - "ptx:2" -> PTX platform 0, device 2
    /// - "spirv" -> SPIR-V platform 0, device 0
    pub fn parse(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        let invalid = || InvalidDeviceSnafu { device: s.to_string() }.build();
        let parts: Vec<&str> = upper.split(':').collect();

        let backend = Backend::parse(parts[0]).ok_or_else(invalid)?;
        let index = |part: &str| part.parse::<usize>().map_err(|_| invalid());

        match parts.as_slice() {
            [_] => Ok(Self::new(backend, 0, 0)),
            [_, device] => Ok(Self::new(backend, 0, index(*device)?)),
            [_, platform, device] => Ok(Self::new(backend, index(*platform)?, index(*device)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.backend, self.platform, self.device)
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
