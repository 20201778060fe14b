//! FPGA scheduling.
//!
//! FPGA kernels are synthesized for a fixed work-group shape, so the local work
//! size is pinned to `{64, 1, 1}` and the global work is always padded to a
//! multiple of 32.

use gridwise_device::{DeviceCapabilities, Dims, MAX_DIMS};
use snafu::ensure;

use crate::divisor::largest_divisor_at_most;
use crate::error::{CapacitySnafu, Result};

/// Fixed FPGA work-group shape.
pub const FPGA_LOCAL_WORK: [usize; MAX_DIMS] = [64, 1, 1];

/// Global work padding for FPGA launches.
pub const FPGA_WARP_SIZE: usize = 32;

/// Local work for an FPGA launch.
///
/// Fails with [`crate::Error::Capacity`] when a 64-wide dimension has no
/// 64-wide divisor, i.e. the domain is too small for the synthesized group.
pub fn calculate_local_work(global_work: &[usize], device: &DeviceCapabilities) -> Result<Dims> {
    global_work
        .iter()
        .zip(FPGA_LOCAL_WORK)
        .enumerate()
        .map(|(dimension, (&global, default))| {
            let local = largest_divisor_at_most(default, global);
            ensure!(
                default == 1 || local == default,
                CapacitySnafu { device: device.id, dimension, global_work: global, local_work: local, minimum: default }
            );
            Ok(local)
        })
        .collect()
}
