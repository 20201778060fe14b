//! Adaptive NVIDIA local work computation.
//!
//! Multi-dimensional launches use the square root of each dimension's work-item
//! limit as the search bound, so that the product of the dimensions stays near
//! the device's group size. Groups of a warp or more are halved once more to
//! leave room for more resident blocks per SM. The adaptation pass then pulls
//! the product under the aggregate bound.

use gridwise_device::{DeviceCapabilities, Dims};
use smallvec::smallvec;

use crate::config::AggregateBound;
use crate::divisor::{calculate_group_size, largest_divisor_at_most};
use crate::plan::checked_product;

/// NVIDIA warp size.
pub const WARP_SIZE: usize = 32;

pub fn calculate_local_work(global_work: &[usize], device: &DeviceCapabilities) -> Dims {
    let depth = global_work.len();
    let mut local_work: Dims = smallvec![1; depth];
    for (dim, &global) in global_work.iter().enumerate() {
        let max = device.max_work_item_size(dim);
        let bound = if depth == 1 { max } else { max.isqrt() };

        let mut size = calculate_group_size(bound, 0, global);
        if size >= WARP_SIZE && depth > 1 {
            size = largest_divisor_at_most(size / 2, global);
        }
        local_work[dim] = size;
    }
    local_work
}

/// Work-group ceiling used by [`check_and_adapt_local_work`].
pub fn aggregate_ceiling(device: &DeviceCapabilities, bound: AggregateBound) -> usize {
    match bound {
        AggregateBound::PerDimensionSum => device.summed_work_group_size(),
        AggregateBound::DeviceScalar => device.max_work_group_size,
    }
}

/// Shrink `local_work` until its product fits the aggregate ceiling.
///
/// Starting from the highest dimension, each dimension is set to the ceiling
/// divided by the product of the others, clamped to at least 1 and snapped down
/// to a divisor of its global size. Lower dimensions are only touched while the
/// product still exceeds the ceiling.
pub fn check_and_adapt_local_work(
    local_work: &mut Dims,
    global_work: &[usize],
    device: &DeviceCapabilities,
    bound: AggregateBound,
) {
    let ceiling = aggregate_ceiling(device, bound).max(1);
    let total = checked_product(local_work).unwrap_or(usize::MAX);
    if total <= ceiling {
        return;
    }

    for dim in (0..local_work.len()).rev() {
        let others = local_work
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != dim)
            .try_fold(1usize, |acc, (_, &size)| acc.checked_mul(size))
            .unwrap_or(usize::MAX);
        let target = (ceiling / others.max(1)).max(1);
        local_work[dim] = largest_divisor_at_most(target, global_work[dim]);

        if checked_product(local_work).is_some_and(|product| product <= ceiling) {
            break;
        }
    }

    tracing::debug!(
        device = %device.id,
        ceiling,
        before = total,
        local_work = ?local_work.as_slice(),
        "adapted local work to aggregate bound"
    );
}
