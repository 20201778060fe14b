//! Launch scheduling for heterogeneous kernels.
//!
//! Given an [`IterationDomain`] and the [`DeviceCapabilities`](gridwise_device::DeviceCapabilities)
//! of the target, this crate computes the [`LaunchPlan`] (global work, local
//! work, offsets) of one kernel submission.
//!
//! # Module Organization
//!
//! - [`domain`] - Iteration domains and batch overrides
//! - [`divisor`] - Largest-divisor search shared by the GPU and FPGA families
//! - [`selector`] - Device descriptor to [`StrategyKind`]
//! - [`strategy`] - CPU, generic GPU, AMD, NVIDIA and FPGA schedulers
//! - [`grid`] / [`fit`] - Explicit worker grids and the device fit-check
//! - [`plan`] - Launch plans and the thread-info dump
//! - [`config`] - Scheduler configuration and per-task options
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gridwise_device::{DeviceCapabilities, DeviceId};
//! use gridwise_schedule::{IterationDomain, SchedulerConfig, Strategy, TaskOptions};
//!
//! let device = Arc::new(DeviceCapabilities::nvidia(DeviceId::ptx(0)));
//! let strategy = Strategy::for_device(device, &SchedulerConfig::default())?;
//! let domain = IterationDomain::from_shape(&[4096, 4096])?;
//! let plan = strategy.plan(&domain, &TaskOptions::default(), None)?;
//! assert_eq!(plan.local_work.as_deref(), Some(&[16, 16][..]));
//! ```

pub mod config;
pub mod divisor;
pub mod domain;
pub mod error;
pub mod fit;
pub mod grid;
pub mod plan;
pub mod selector;
pub mod strategy;


pub use config::{AggregateBound, NVIDIA_ADAPTIVE_MIN_DRIVER, SchedulerConfig, TaskOptions};
pub use divisor::{calculate_group_size, largest_divisor_at_most};
pub use domain::{BatchOverride, DomainDim, IterationDomain};
pub use error::{Error, Result};
pub use fit::{ConfigurationMismatch, FitCheck, check_worker_grid, fits_on_device};
pub use grid::WorkerGrid;
pub use plan::{LaunchPlan, ThreadInfo, checked_product};
pub use selector::select_strategy;
pub use strategy::{Strategy, StrategyKind, calculate_global_work};
