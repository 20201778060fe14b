//! Error types for kernel launches.

use gridwise_device::DeviceId;
use snafu::Snafu;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while planning or dispatching a launch.
///
/// Every launch failure carries the task and device it happened on.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Scheduling the task failed (capacity, driver incompatibility, invalid domain).
    #[snafu(display("launch of task '{task}' on {device} failed: {source}"))]
    Launch { task: String, device: DeviceId, source: gridwise_schedule::Error },

    /// Device lookup failed.
    #[snafu(display("Device error: {source}"))]
    Device { source: gridwise_device::Error },

    /// The enqueue layer rejected the launch.
    #[snafu(display("dispatch of task '{task}' on {device} failed: {reason}"))]
    Dispatch { task: String, device: DeviceId, reason: String },
}

impl Error {
    /// The scheduling error behind a launch failure, if any.
    pub fn schedule_error(&self) -> Option<&gridwise_schedule::Error> {
        match self {
            Self::Launch { source, .. } => Some(source),
            _ => None,
        }
    }
}
