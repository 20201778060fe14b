//! Driver version parsing and ordering.
//!
//! Drivers report free-form version strings: NVIDIA uses `550.67`, AMD
//! `3614.0 (HSA1.1,LC)`, Intel `31.0.101.4502`. Only the leading numeric
//! `major[.minor[.patch]]` components take part in comparisons.

use std::fmt;
use std::str::FromStr;

use snafu::OptionExt;

use crate::error::{Error, InvalidDriverVersionSnafu, Result};

/// Numeric driver version, ordered lexicographically by (major, minor, patch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl DriverVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse the leading numeric components of a driver version string.
    ///
    /// Missing components default to zero; trailing annotations such as
    /// `(HSA1.1,LC)` are ignored.
    pub fn parse(s: &str) -> Result<Self> {
        let token = s.split_whitespace().next().unwrap_or_default();
        let mut components = token.split('.').map(leading_number);

        let major = components.next().flatten().context(InvalidDriverVersionSnafu { version: s })?;

        let minor = components.next().flatten().unwrap_or(0);
        let patch = components.next().flatten().unwrap_or(0);
        Ok(Self { major, minor, patch })
    }
}

/// Parse the digits at the start of `component`, ignoring any suffix.
fn leading_number(component: &str) -> Option<u32> {
    let end = component.find(|c: char| !c.is_ascii_digit()).unwrap_or(component.len());
    component[..end].parse().ok()
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.patch != 0 {
            write!(f, ".{}", self.patch)?;
        }
        Ok(())
    }
}

impl FromStr for DriverVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
