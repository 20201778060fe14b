//! Scheduler configuration types.
//!
//! [`SchedulerConfig`] carries the device-wide tunables that pick and shape a
//! strategy; [`TaskOptions`] carries the per-task ones. Both support explicit
//! construction through `bon` builders and environment variable fallbacks.

use bon::bon;
use gridwise_device::{DriverVersion, MAX_DIMS};

/// Minimum NVIDIA driver for the adaptive NVIDIA strategy.
pub const NVIDIA_ADAPTIVE_MIN_DRIVER: DriverVersion = DriverVersion::new(550, 67, 0);

// ============================================================================
// AGGREGATE BOUND
// ============================================================================

/// Work-group ceiling used by the NVIDIA adaptation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregateBound {
    /// Sum of the driver-reported per-dimension work-group maxima (default).
    #[default]
    PerDimensionSum,

    /// The scalar `max_work_group_size` reported by the device.
    DeviceScalar,
}

impl AggregateBound {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "per-dim" | "per_dim" => Some(Self::PerDimensionSum),
            "scalar" | "device" => Some(Self::DeviceScalar),
            _ => None,
        }
    }
}

// ============================================================================
// SCHEDULER CONFIGURATION
// ============================================================================

/// Device-wide scheduler configuration, fixed when a strategy is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Use the CPU block scheduler on CPU devices. When off, CPUs are
    /// scheduled with the GPU strategy of their vendor.
    pub block_scheduler: bool,
    /// Round global work up to the vendor warp size (AMD, NVIDIA, generic GPU).
    pub irregular_adjustment: bool,
    /// Dump launch dimensions for every launch.
    pub thread_info: bool,
    /// Ceiling used by the NVIDIA adaptation pass.
    pub aggregate_bound: AggregateBound,
    /// Minimum driver version for the adaptive NVIDIA strategy.
    pub nvidia_min_driver: DriverVersion,
    /// Block sizes per dimension (0 = unset), overriding the device's configured ones.
    pub custom_block_sizes: [usize; MAX_DIMS],
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            block_scheduler: true,
            irregular_adjustment: false,
            thread_info: false,
            aggregate_bound: AggregateBound::PerDimensionSum,
            nvidia_min_driver: NVIDIA_ADAPTIVE_MIN_DRIVER,
            custom_block_sizes: [0; MAX_DIMS],
        }
    }
}

#[bon]
impl SchedulerConfig {
    /// Create a scheduler configuration with builder pattern.
    #[builder]
    pub fn new(
        #[builder(default = true)] block_scheduler: bool,
        #[builder(default = false)] irregular_adjustment: bool,
        #[builder(default = false)] thread_info: bool,
        #[builder(default)] aggregate_bound: AggregateBound,
        #[builder(default = NVIDIA_ADAPTIVE_MIN_DRIVER)] nvidia_min_driver: DriverVersion,
        #[builder(default)] custom_block_sizes: [usize; MAX_DIMS],
    ) -> Self {
        Self {
            block_scheduler,
            irregular_adjustment,
            thread_info,
            aggregate_bound,
            nvidia_min_driver,
            custom_block_sizes,
        }
    }
}

impl SchedulerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GRIDWISE_BLOCK_SCHEDULER` - `0`/`false` schedules CPUs like GPUs (default: on)
    /// * `GRIDWISE_IRREGULAR` - Round global work to the warp size (default: off)
    /// * `GRIDWISE_THREAD_INFO` - Dump launch dimensions (default: off)
    /// * `GRIDWISE_AGGREGATE_BOUND` - `sum` or `scalar` (default: sum)
    /// * `GRIDWISE_NVIDIA_MIN_DRIVER` - Adaptive NVIDIA driver threshold (default: 550.67)
    /// * `GRIDWISE_BLOCK_X`, `GRIDWISE_BLOCK_Y`, `GRIDWISE_BLOCK_Z` - Custom block sizes
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let block_scheduler = env_flag("GRIDWISE_BLOCK_SCHEDULER").unwrap_or(defaults.block_scheduler);
        let irregular_adjustment = env_flag("GRIDWISE_IRREGULAR").unwrap_or(defaults.irregular_adjustment);
        let thread_info = env_flag("GRIDWISE_THREAD_INFO").unwrap_or(defaults.thread_info);
        let aggregate_bound = std::env::var("GRIDWISE_AGGREGATE_BOUND")
            .ok()
            .and_then(|s| AggregateBound::parse(&s))
            .unwrap_or(defaults.aggregate_bound);
        let nvidia_min_driver = std::env::var("GRIDWISE_NVIDIA_MIN_DRIVER")
            .ok()
            .and_then(|s| DriverVersion::parse(&s).ok())
            .unwrap_or(defaults.nvidia_min_driver);
        let custom_block_sizes = ["GRIDWISE_BLOCK_X", "GRIDWISE_BLOCK_Y", "GRIDWISE_BLOCK_Z"]
            .map(|name| std::env::var(name).ok().and_then(|s| s.parse().ok()).unwrap_or(0));

        Self {
            block_scheduler,
            irregular_adjustment,
            thread_info,
            aggregate_bound,
            nvidia_min_driver,
            custom_block_sizes,
        }
    }
}

/// Read a boolean environment variable (`1`/`true`/`on` or `0`/`false`/`off`).
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

// ============================================================================
// TASK OPTIONS
// ============================================================================

/// Per-task launch options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskOptions {
    /// Let CPU tasks launch one work-item per domain point instead of one per compute unit.
    pub thread_coarsening: bool,
    /// Block sizes per dimension (0 = unset); take precedence over configured ones.
    pub custom_block_sizes: [usize; MAX_DIMS],
    /// Dump launch dimensions for this task.
    pub thread_info: bool,
}

#[bon]
impl TaskOptions {
    #[builder]
    pub fn new(
        #[builder(default = false)] thread_coarsening: bool,
        #[builder(default)] custom_block_sizes: [usize; MAX_DIMS],
        #[builder(default = false)] thread_info: bool,
    ) -> Self {
        Self { thread_coarsening, custom_block_sizes, thread_info }
    }
}

// ============================================================================
// TESTS
// ============================================================================
