//! Device fit-check for local work sizes.
//!
//! A local work size fits a device when the work-group product stays within
//! `max_work_group_size` and every dimension stays within its
//! `max_work_item_sizes` entry. Explicit worker grids that do not fit are
//! corrected, never rejected: FPGA devices fall back to `{64, 1, 1}`, all other
//! devices defer the local size to the driver.

use gridwise_device::{DeviceCapabilities, DeviceId, Dims};

use crate::grid::WorkerGrid;
use crate::plan::{LaunchPlan, checked_product};
use crate::strategy::fpga::FPGA_LOCAL_WORK;

/// A local work size that does not fit its device, and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationMismatch {
    pub device: DeviceId,
    pub requested: Dims,
    /// Product of the requested local sizes, saturating at `usize::MAX`.
    pub total: usize,
    /// Device `max_work_group_size`.
    pub limit: usize,
    /// Replacement local work, `None` when deferred to the driver.
    pub fallback: Option<Dims>,
}

/// Outcome of a fit-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitCheck {
    Fits,
    Corrected(ConfigurationMismatch),
}

impl FitCheck {
    pub fn is_corrected(&self) -> bool {
        matches!(self, Self::Corrected(_))
    }
}

/// Whether `local_work` respects the device's work-group and work-item limits.
///
/// A product that overflows `usize` never fits.
pub fn fits_on_device(local_work: &[usize], device: &DeviceCapabilities) -> bool {
    checked_product(local_work).is_some_and(|total| total <= device.max_work_group_size)
        && local_work.iter().enumerate().all(|(dim, &size)| size <= device.max_work_item_size(dim))
}

/// Check an explicit worker grid against `device`.
///
/// Global work and offsets are used verbatim; only the local work is corrected.
pub fn check_worker_grid(grid: &WorkerGrid, device: &DeviceCapabilities) -> (LaunchPlan, FitCheck) {
    let mut plan = grid.to_plan();
    let Some(requested) = plan.local_work.take() else {
        return (plan, FitCheck::Fits);
    };

    if fits_on_device(&requested, device) {
        plan.local_work = Some(requested);
        return (plan, FitCheck::Fits);
    }

    let fallback = device.is_fpga().then(|| FPGA_LOCAL_WORK[..grid.dims()].iter().copied().collect::<Dims>());
    let mismatch = mismatch(device, requested, fallback.clone());
    tracing::warn!(
        device = %device.id,
        requested = ?mismatch.requested.as_slice(),
        total = mismatch.total,
        limit = mismatch.limit,
        fallback = ?fallback.as_deref(),
        "worker grid does not fit the device, correcting local work"
    );

    plan.local_work = fallback;
    (plan, FitCheck::Corrected(mismatch))
}

/// Validate a strategy-computed plan; a local size that does not fit is deferred to the driver.
pub(crate) fn validate_plan(mut plan: LaunchPlan, device: &DeviceCapabilities) -> (LaunchPlan, FitCheck) {
    match plan.local_work.take() {
        Some(local) if !fits_on_device(&local, device) => {
            let mismatch = mismatch(device, local, None);
            tracing::warn!(
                device = %device.id,
                requested = ?mismatch.requested.as_slice(),
                total = mismatch.total,
                limit = mismatch.limit,
                "computed local work exceeds device limits, deferring to driver"
            );
            (plan, FitCheck::Corrected(mismatch))
        }
        local => {
            plan.local_work = local;
            (plan, FitCheck::Fits)
        }
    }
}

fn mismatch(device: &DeviceCapabilities, requested: Dims, fallback: Option<Dims>) -> ConfigurationMismatch {
    ConfigurationMismatch {
        device: device.id,
        total: checked_product(&requested).unwrap_or(usize::MAX),
        limit: device.max_work_group_size,
        requested,
        fallback,
    }
}
