//! Strategy selection.
//!
//! Maps a device's class, vendor and driver version to a [`StrategyKind`]. The
//! result depends only on the device descriptor and the configuration, so
//! callers evaluate it once per device and cache it.

use gridwise_device::{DeviceCapabilities, DeviceClass, Vendor};

use crate::config::SchedulerConfig;
use crate::error::{DriverIncompatibilitySnafu, Result};
use crate::strategy::StrategyKind;

/// Pick the strategy family for `device`.
pub fn select_strategy(device: &DeviceCapabilities, config: &SchedulerConfig) -> Result<StrategyKind> {
    let kind = match device.device_class {
        DeviceClass::Cpu if config.block_scheduler => StrategyKind::Cpu,
        DeviceClass::Cpu | DeviceClass::Gpu => gpu_strategy(device, config),
        DeviceClass::Accelerator if device.is_fpga() => StrategyKind::Fpga,
        DeviceClass::Accelerator if device.is_gpu_class_accelerator() => gpu_strategy(device, config),
        DeviceClass::Accelerator => StrategyKind::Cpu,
        DeviceClass::Custom => {
            tracing::error!(device = %device.id, name = %device.name, "no scheduler available for device");
            return DriverIncompatibilitySnafu { device: device.id, device_class: device.device_class }.fail();
        }
    };

    tracing::debug!(
        device = %device.id,
        vendor = %device.vendor,
        class = %device.device_class,
        strategy = %kind,
        "selected strategy"
    );
    Ok(kind)
}

fn gpu_strategy(device: &DeviceCapabilities, config: &SchedulerConfig) -> StrategyKind {
    match device.vendor {
        Vendor::Amd => StrategyKind::Amd,
        Vendor::Nvidia => match device.parsed_driver_version() {
            Ok(version) if version >= config.nvidia_min_driver => StrategyKind::Nvidia,
            Ok(version) => {
                tracing::debug!(
                    device = %device.id,
                    %version,
                    minimum = %config.nvidia_min_driver,
                    "NVIDIA driver below adaptive threshold"
                );
                StrategyKind::GenericGpu
            }
            Err(error) => {
                tracing::warn!(device = %device.id, %error, "unparseable NVIDIA driver version");
                StrategyKind::GenericGpu
            }
        },
        Vendor::Intel | Vendor::Codeplay | Vendor::Generic => StrategyKind::GenericGpu,
    }
}
