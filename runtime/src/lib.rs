//! Launch runtime for the gridwise scheduler.
//!
//! Ties devices, strategies and tasks together:
//!
//! - [`SchedulerRegistry`] caches one scheduling strategy per device.
//! - [`KernelTask`] memoizes the launch plan of one kernel.
//! - [`GridScheduler`] attaches explicit worker grids to tasks by name.
//! - [`launch`] plans a task and hands it to a [`Dispatcher`].
//!
//! # Example
//!
//! ```ignore
//! use gridwise_device::{DeviceCapabilities, DeviceId, registry};
//! use gridwise_runtime::{KernelTask, launch, schedulers};
//! use gridwise_schedule::IterationDomain;
//!
//! registry().register(DeviceCapabilities::amd(DeviceId::opencl(0, 0)));
//! let mut task = KernelTask::on_device("s0.t0", "OPENCL:0:0", IterationDomain::from_shape(&[8192])?)?;
//! launch(&mut task, schedulers(), &my_dispatcher, None)?;
//! ```

pub mod dispatch;
pub mod error;
pub mod grid_scheduler;
pub mod scheduler_cache;
pub mod task;


pub use dispatch::{Dispatcher, launch};
pub use error::*;
pub use grid_scheduler::GridScheduler;
pub use scheduler_cache::{SCHEDULERS, SchedulerRegistry, schedulers};
pub use task::KernelTask;
