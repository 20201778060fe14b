use snafu::Snafu;

use crate::id::DeviceId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Device string could not be parsed into a [`DeviceId`].
    #[snafu(display("invalid device: {device}"))]
    InvalidDevice { device: String },

    /// Device was never registered during discovery.
    #[snafu(display("device {id} has not been discovered"))]
    DeviceNotFound { id: DeviceId },

    /// Driver version string does not start with a numeric `major` component.
    #[snafu(display("invalid driver version: {version:?}"))]
    InvalidDriverVersion { version: String },

    /// Reported hardware limits are unusable for scheduling.
    #[snafu(display("invalid capabilities for {id}: {reason}"))]
    InvalidCapabilities { id: DeviceId, reason: &'static str },
}
