//! Per-device scheduling strategy cache.
//!
//! Strategy selection depends only on the device descriptor and the scheduler
//! configuration, so it runs once per device. Uses papaya's lock-free HashMap
//! so that tasks launched from several threads share one strategy per device
//! without explicit synchronization.
//!
//! # Thread Safety
//!
//! If several threads ask for the same device concurrently, the first insert
//! wins and every caller receives a clone of that `Arc`.

use std::sync::Arc;

use gridwise_device::{DeviceCapabilities, DeviceId};
use gridwise_schedule::{SchedulerConfig, Strategy};
use once_cell::sync::Lazy;
use papaya::HashMap;

/// Strategies keyed by device, all built from one [`SchedulerConfig`].
pub struct SchedulerRegistry {
    config: SchedulerConfig,
    strategies: HashMap<DeviceId, Arc<Strategy>>,
}

impl SchedulerRegistry {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config, strategies: HashMap::new() }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Get the strategy for `device`, selecting it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`gridwise_schedule::Error::DriverIncompatibility`] if no strategy
    /// supports the device. Failed selections are not cached.
    pub fn get_or_select(&self, device: &Arc<DeviceCapabilities>) -> gridwise_schedule::Result<Arc<Strategy>> {
        let guard = self.strategies.guard();

        // Fast path: strategy already selected
        if let Some(strategy) = self.strategies.get(&device.id, &guard) {
            return Ok(Arc::clone(strategy));
        }

        let selected = Arc::new(Strategy::for_device(Arc::clone(device), &self.config)?);

        // Atomic insert - if another thread beat us, use their strategy
        use papaya::{Compute, Operation};
        match self.strategies.compute(
            device.id,
            |entry| match entry {
                Some((_, existing)) => Operation::Abort(Arc::clone(existing)),
                None => Operation::Insert(Arc::clone(&selected)),
            },
            &guard,
        ) {
            Compute::Inserted(_, strategy) => {
                tracing::debug!(device = %device.id, strategy = %strategy.kind(), "cached scheduling strategy");
                Ok(Arc::clone(strategy))
            }
            Compute::Aborted(strategy) => Ok(strategy),
            _ => Ok(selected),
        }
    }

    /// Cached strategy for `device`, if one was selected.
    pub fn get(&self, device: &DeviceId) -> Option<Arc<Strategy>> {
        let guard = self.strategies.guard();
        self.strategies.get(device, &guard).cloned()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Drop every cached strategy.
    pub fn clear(&self) {
        let guard = self.strategies.guard();
        self.strategies.clear(&guard);
    }
}

impl Default for SchedulerRegistry {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

/// Global strategy cache, configured from the environment on first access.
///
/// See [`SchedulerConfig::from_env`] for the recognized variables.
pub static SCHEDULERS: Lazy<SchedulerRegistry> = Lazy::new(|| SchedulerRegistry::new(SchedulerConfig::from_env()));

/// Access the global strategy cache.
pub fn schedulers() -> &'static SchedulerRegistry {
    &SCHEDULERS
}
