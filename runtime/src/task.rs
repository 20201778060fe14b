//! Kernel tasks and launch-plan memoization.
//!
//! A [`KernelTask`] pairs an iteration domain with the device it runs on. Its
//! [`LaunchPlan`] is computed on the first launch and reused until the domain,
//! the options, the worker grid or the batch override change.

use std::sync::Arc;

use bon::bon;
use gridwise_device::DeviceCapabilities;
use gridwise_schedule::{
    BatchOverride, FitCheck, IterationDomain, LaunchPlan, TaskOptions, WorkerGrid, check_worker_grid,
};
use snafu::ResultExt;

use crate::error::{DeviceSnafu, LaunchSnafu, Result};
use crate::scheduler_cache::SchedulerRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedPlan {
    batch: Option<BatchOverride>,
    plan: LaunchPlan,
}

/// One parallel kernel bound to a device.
#[derive(Debug, Clone)]
pub struct KernelTask {
    name: String,
    device: Arc<DeviceCapabilities>,
    domain: IterationDomain,
    options: TaskOptions,
    worker_grid: Option<WorkerGrid>,
    cached: Option<CachedPlan>,
}

#[bon]
impl KernelTask {
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        device: Arc<DeviceCapabilities>,
        #[builder(default)] domain: IterationDomain,
        #[builder(default)] options: TaskOptions,
        worker_grid: Option<WorkerGrid>,
    ) -> Self {
        Self { name, device, domain, options, worker_grid, cached: None }
    }
}

impl KernelTask {
    /// Task on a device from the global device registry (e.g. `"OPENCL:0:1"`).
    pub fn on_device(name: impl Into<String>, device: &str, domain: IterationDomain) -> Result<Self> {
        let device = gridwise_device::get_device(device).context(DeviceSnafu)?;
        Ok(Self::builder().name(name).device(device).domain(domain).build())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> &Arc<DeviceCapabilities> {
        &self.device
    }

    pub fn domain(&self) -> &IterationDomain {
        &self.domain
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    pub fn worker_grid(&self) -> Option<&WorkerGrid> {
        self.worker_grid.as_ref()
    }

    /// Replace the iteration domain, dropping the cached plan.
    pub fn set_domain(&mut self, domain: IterationDomain) {
        self.domain = domain;
        self.invalidate();
    }

    pub fn set_options(&mut self, options: TaskOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Attach (or detach) an explicit worker grid, dropping the cached plan.
    pub fn set_worker_grid(&mut self, worker_grid: Option<WorkerGrid>) {
        self.worker_grid = worker_grid;
        self.invalidate();
    }

    /// The memoized plan, if one was computed.
    pub fn cached_plan(&self) -> Option<&LaunchPlan> {
        self.cached.as_ref().map(|cached| &cached.plan)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Launch plan for this task, computed on first use.
    ///
    /// A worker grid bypasses strategy selection and only goes through the
    /// device fit-check. Otherwise the device's strategy is taken from
    /// `schedulers`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Launch`] carrying the task and device when the
    /// strategy cannot schedule the domain.
    pub fn launch_plan(
        &mut self,
        schedulers: &SchedulerRegistry,
        batch: Option<BatchOverride>,
    ) -> Result<&LaunchPlan> {
        let cached = match self.cached.take() {
            Some(cached) if cached.batch == batch => cached,
            _ => CachedPlan { batch, plan: self.compute_plan(schedulers, batch)? },
        };
        Ok(&self.cached.insert(cached).plan)
    }

    fn compute_plan(&self, schedulers: &SchedulerRegistry, batch: Option<BatchOverride>) -> Result<LaunchPlan> {
        if let Some(grid) = &self.worker_grid {
            let (plan, fit) = check_worker_grid(grid, &self.device);
            if let FitCheck::Corrected(mismatch) = &fit {
                tracing::debug!(task = %self.name, fallback = ?mismatch.fallback.as_deref(), "worker grid corrected");
            }
            return Ok(plan);
        }

        let context = || LaunchSnafu { task: self.name.clone(), device: self.device.id };
        let strategy = schedulers.get_or_select(&self.device).with_context(|_| context())?;
        strategy.plan(&self.domain, &self.options, batch).with_context(|_| context())
    }
}
