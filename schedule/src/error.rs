use gridwise_device::{DeviceClass, DeviceId};
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("iteration domain has {depth} dimensions, at most {max} are supported"))]
    TooManyDimensions { depth: usize, max: usize },

    #[snafu(display("dimension {dimension} of the iteration domain has zero cardinality"))]
    ZeroCardinality { dimension: usize },

    #[snafu(display("invalid worker grid: {reason}"))]
    InvalidWorkerGrid { reason: &'static str },

    /// The domain is too small for the device family (FPGA local groups must be exactly `minimum` wide).
    #[snafu(display(
        "minimum input of {minimum} elements required on {device}: dimension {dimension} has global work \
         {global_work}, largest local group is {local_work}"
    ))]
    Capacity { device: DeviceId, dimension: usize, global_work: usize, local_work: usize, minimum: usize },

    /// No scheduler variant matches the device descriptor.
    #[snafu(display("no scheduler available for device {device} ({device_class})"))]
    DriverIncompatibility { device: DeviceId, device_class: DeviceClass },
}
