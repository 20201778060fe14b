//! CPU block scheduler.
//!
//! CPUs launch one work-item per compute unit along the first dimension and let
//! each work-item iterate over a block of the domain. With thread coarsening
//! enabled, the launch covers the domain itself. The local work size is always
//! left to the driver.

use gridwise_device::{DeviceCapabilities, Dims};
use smallvec::smallvec;

use crate::domain::{BatchOverride, IterationDomain};

pub fn calculate_global_work(
    domain: &IterationDomain,
    device: &DeviceCapabilities,
    thread_coarsening: bool,
    batch: Option<BatchOverride>,
) -> Dims {
    if thread_coarsening {
        return domain
            .launch_cardinalities(batch)
            .into_iter()
            .enumerate()
            .map(|(dim, cardinality)| if device.max_work_item_size(dim) > 1 { cardinality } else { 1 })
            .collect();
    }

    let mut global_work: Dims = smallvec![1; domain.launch_depth()];
    global_work[0] = device.max_compute_units.max(1);
    global_work
}
