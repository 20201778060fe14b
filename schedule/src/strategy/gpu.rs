//! Generic and AMD GPU local work computation.
//!
//! Both families run the same divisor cascade; they differ only in the warp
//! size used for optional global work rounding.

use gridwise_device::{DeviceCapabilities, Dims, MAX_DIMS};
use smallvec::smallvec;

use crate::divisor::calculate_group_size;

/// Local work per dimension, recomputed from the highest dimension down.
///
/// Each entry is the largest divisor of the global size under the device's
/// per-dimension work-item limit, with `custom_block_sizes` acting as a floor
/// for the bound.
pub fn calculate_local_work(
    global_work: &[usize],
    device: &DeviceCapabilities,
    custom_block_sizes: &[usize; MAX_DIMS],
) -> Dims {
    let mut local_work: Dims = smallvec![1; global_work.len()];
    for dim in (0..global_work.len()).rev() {
        local_work[dim] =
            calculate_group_size(device.max_work_item_size(dim), custom_block_sizes[dim], global_work[dim]);
    }
    local_work
}
