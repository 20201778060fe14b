//! Vendor-family scheduling strategies.
//!
//! A [`Strategy`] turns an [`IterationDomain`] into a [`LaunchPlan`] for one
//! device. The family is a closed set ([`StrategyKind`]) chosen once per device
//! by [`crate::selector::select_strategy`]:
//!
//! | Kind         | Global work                          | Local work                                  |
//! |--------------|--------------------------------------|---------------------------------------------|
//! | `Cpu`        | compute units (or domain, coarsened) | driver default                              |
//! | `GenericGpu` | domain, optional warp rounding (32)  | divisor cascade over `max_work_item_sizes`  |
//! | `Amd`        | domain, optional warp rounding (64)  | divisor cascade over `max_work_item_sizes`  |
//! | `Nvidia`     | domain, optional warp rounding (32)  | square-root heuristic + adaptation pass     |
//! | `Fpga`       | domain, always rounded to 32         | fixed `{64, 1, 1}`                          |
//!
//! Every computed plan is validated against the device limits before it is
//! returned (see [`crate::fit`]).

pub mod cpu;
pub mod fpga;
pub mod gpu;
pub mod nvidia;

use std::sync::Arc;

use gridwise_device::{DeviceCapabilities, Dims, MAX_DIMS};

use crate::config::{SchedulerConfig, TaskOptions};
use crate::domain::{BatchOverride, IterationDomain};
use crate::error::Result;
use crate::fit::{FitCheck, check_worker_grid, validate_plan};
use crate::grid::WorkerGrid;
use crate::plan::LaunchPlan;
use crate::selector::select_strategy;

/// Scheduler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    #[strum(to_string = "cpu")]
    Cpu,
    #[strum(to_string = "generic-gpu")]
    GenericGpu,
    #[strum(to_string = "amd")]
    Amd,
    #[strum(to_string = "nvidia")]
    Nvidia,
    #[strum(to_string = "fpga")]
    Fpga,
}

impl StrategyKind {
    /// Warp size used when rounding global work up.
    pub const fn warp_size(&self) -> usize {
        match self {
            Self::Amd => 64,
            Self::Cpu | Self::GenericGpu | Self::Nvidia | Self::Fpga => 32,
        }
    }
}

/// A scheduling strategy bound to one device.
///
/// Strategies are immutable once built and shared across tasks targeting the
/// same device.
#[derive(Debug, Clone)]
pub struct Strategy {
    kind: StrategyKind,
    device: Arc<DeviceCapabilities>,
    config: SchedulerConfig,
}

impl Strategy {
    pub fn new(kind: StrategyKind, device: Arc<DeviceCapabilities>, config: SchedulerConfig) -> Self {
        Self { kind, device, config }
    }

    /// Select the strategy family for `device` and bind it.
    pub fn for_device(device: Arc<DeviceCapabilities>, config: &SchedulerConfig) -> Result<Self> {
        let kind = select_strategy(&device, config)?;
        Ok(Self::new(kind, device, config.clone()))
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn device(&self) -> &Arc<DeviceCapabilities> {
        &self.device
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Compute the launch plan for `domain`.
    #[tracing::instrument(skip_all, fields(strategy = %self.kind, device = %self.device.id, depth = domain.depth()))]
    pub fn plan(
        &self,
        domain: &IterationDomain,
        options: &TaskOptions,
        batch: Option<BatchOverride>,
    ) -> Result<LaunchPlan> {
        let device = self.device.as_ref();
        let plan = match self.kind {
            StrategyKind::Cpu => {
                LaunchPlan::new(cpu::calculate_global_work(domain, device, options.thread_coarsening, batch), None)
            }
            StrategyKind::GenericGpu | StrategyKind::Amd => {
                let global_work = self.calculate_global_work(domain, batch);
                let local_work = gpu::calculate_local_work(&global_work, device, &self.custom_block_sizes(options));
                LaunchPlan::new(global_work, Some(local_work))
            }
            StrategyKind::Nvidia => {
                let global_work = self.calculate_global_work(domain, batch);
                let mut local_work = nvidia::calculate_local_work(&global_work, device);
                nvidia::check_and_adapt_local_work(&mut local_work, &global_work, device, self.config.aggregate_bound);
                LaunchPlan::new(global_work, Some(local_work))
            }
            StrategyKind::Fpga => {
                let global_work = calculate_global_work(domain, batch, Some(fpga::FPGA_WARP_SIZE));
                let local_work = fpga::calculate_local_work(&global_work, device)?;
                LaunchPlan::new(global_work, Some(local_work))
            }
        };

        let (plan, fit) = validate_plan(plan, device);
        tracing::debug!(plan = %plan, corrected = fit.is_corrected(), "computed launch plan");
        Ok(plan)
    }

    /// Fit-check an explicit worker grid against this strategy's device.
    pub fn fit_worker_grid(&self, grid: &WorkerGrid) -> (LaunchPlan, FitCheck) {
        check_worker_grid(grid, &self.device)
    }

    /// Per-dimension block sizes; task options win over configuration, which wins over the device.
    pub fn custom_block_sizes(&self, options: &TaskOptions) -> [usize; MAX_DIMS] {
        std::array::from_fn(|dim| {
            [options.custom_block_sizes[dim], self.config.custom_block_sizes[dim], self.device.custom_block_sizes[dim]]
                .into_iter()
                .find(|&size| size > 0)
                .unwrap_or(0)
        })
    }

    fn calculate_global_work(&self, domain: &IterationDomain, batch: Option<BatchOverride>) -> Dims {
        let warp = self.config.irregular_adjustment.then(|| self.kind.warp_size());
        calculate_global_work(domain, batch, warp)
    }
}

/// Global work per dimension: the cardinality (or batch override), rounded up to
/// a multiple of `warp` when given.
pub fn calculate_global_work(domain: &IterationDomain, batch: Option<BatchOverride>, warp: Option<usize>) -> Dims {
    let mut global_work = domain.launch_cardinalities(batch);
    if let Some(warp) = warp {
        for size in &mut global_work {
            *size = size.next_multiple_of(warp);
        }
    }
    global_work
}
