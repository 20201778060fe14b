//! Test utilities for strategy and plan tests.

use std::sync::Arc;

use gridwise_device::{DeviceCapabilities, DeviceClass, DeviceId, Vendor};

use crate::{BatchOverride, IterationDomain, LaunchPlan, Result, SchedulerConfig, Strategy, TaskOptions};

/// Device with the given vendor/class and uniform limits.
pub fn device(vendor: Vendor, device_class: DeviceClass, driver_version: &str) -> DeviceCapabilities {
    DeviceCapabilities::builder()
        .id(DeviceId::opencl(0, 0))
        .name(format!("{vendor} {device_class}"))
        .platform("Test Platform")
        .vendor(vendor)
        .device_class(device_class)
        .max_compute_units(16)
        .max_work_item_sizes(vec![1024, 1024, 64])
        .max_work_group_size(1024)
        .driver_version(driver_version)
        .build()
        .expect("test device should be valid")
}

/// AMD GPU reporting a single 1024-wide dimension.
pub fn amd_1d() -> DeviceCapabilities {
    DeviceCapabilities::builder()
        .id(DeviceId::opencl(0, 0))
        .name("AMD Test GPU")
        .platform("AMD Accelerated Parallel Processing")
        .vendor(Vendor::Amd)
        .device_class(DeviceClass::Gpu)
        .max_compute_units(64)
        .max_work_item_sizes(vec![1024])
        .max_work_group_size(1024)
        .driver_version("3614.0")
        .build()
        .expect("test device should be valid")
}

/// Strategy for `device` with default configuration.
pub fn strategy(device: DeviceCapabilities) -> Strategy {
    Strategy::for_device(Arc::new(device), &SchedulerConfig::default()).expect("device should have a strategy")
}

/// Plan a dense domain of `shape` with default options.
pub fn plan(device: DeviceCapabilities, shape: &[usize]) -> Result<LaunchPlan> {
    let domain = IterationDomain::from_shape(shape)?;
    strategy(device).plan(&domain, &TaskOptions::default(), None)
}

/// Plan with a batch override.
pub fn plan_batched(device: DeviceCapabilities, shape: &[usize], batch: usize) -> Result<LaunchPlan> {
    let domain = IterationDomain::from_shape(shape)?;
    strategy(device).plan(&domain, &TaskOptions::default(), BatchOverride::new(batch))
}
