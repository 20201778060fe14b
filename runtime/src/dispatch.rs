//! Launch entry point and the enqueue boundary.

use gridwise_schedule::{BatchOverride, LaunchPlan};

use crate::error::Result;
use crate::scheduler_cache::SchedulerRegistry;
use crate::task::KernelTask;

/// Enqueue layer that submits a planned kernel to its device.
///
/// Implementations own the command queues; the scheduler only supplies the
/// thread distribution. Use [`LaunchPlan::dispatch_sizes`] for APIs that take
/// fixed three-dimensional sizes.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, task: &KernelTask, plan: &LaunchPlan) -> Result<()>;
}

/// Plan `task` (reusing its memoized plan when possible) and hand it to `dispatcher`.
///
/// Emits the thread-info dump at `info` level when enabled for the task or the
/// scheduler configuration.
pub fn launch<D: Dispatcher + ?Sized>(
    task: &mut KernelTask,
    schedulers: &SchedulerRegistry,
    dispatcher: &D,
    batch: Option<BatchOverride>,
) -> Result<()> {
    let thread_info = task.options().thread_info || schedulers.config().thread_info;
    let plan = task.launch_plan(schedulers, batch)?.clone();

    if thread_info {
        tracing::info!("{}", plan.thread_info(task.name(), task.device()));
    }
    dispatcher.dispatch(task, &plan)
}
