//! Launch plans.
//!
//! A [`LaunchPlan`] is the scheduler's output: the dimensionality, global offset,
//! global work and (optionally) local work of one kernel submission. A missing
//! local work size means "let the driver choose".

use std::fmt;

use gridwise_device::{DeviceCapabilities, Dims, MAX_DIMS};
use smallvec::smallvec;

/// Product of `sizes`, or `None` if it overflows `usize`.
pub fn checked_product(sizes: &[usize]) -> Option<usize> {
    sizes.iter().try_fold(1usize, |acc, &size| acc.checked_mul(size))
}

/// Thread distribution for one kernel submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaunchPlan {
    /// Global offset per dimension.
    pub global_offset: Dims,

    /// Work-items launched per dimension.
    pub global_work: Dims,

    /// Work-items per work-group and dimension, or `None` to defer to the driver.
    pub local_work: Option<Dims>,
}

impl LaunchPlan {
    /// Plan with a zero global offset.
    pub fn new(global_work: Dims, local_work: Option<Dims>) -> Self {
        let global_offset = smallvec![0; global_work.len()];
        Self { global_offset, global_work, local_work }
    }

    pub fn dims(&self) -> usize {
        self.global_work.len()
    }

    /// Total work-items launched, saturating at `usize::MAX`.
    pub fn total_threads(&self) -> usize {
        checked_product(&self.global_work).unwrap_or(usize::MAX)
    }

    /// Work-items per work-group (saturating), if the local work size is specified.
    pub fn work_group_size(&self) -> Option<usize> {
        self.local_work.as_deref().map(|local| checked_product(local).unwrap_or(usize::MAX))
    }

    /// Number of work-groups per dimension, if the local work size is specified.
    pub fn work_groups(&self) -> Option<Dims> {
        let local = self.local_work.as_ref()?;
        Some(self.global_work.iter().zip(local).map(|(global, local)| global / local).collect())
    }

    /// Whether every specified local size divides its global size.
    pub fn is_divisible(&self) -> bool {
        match &self.local_work {
            Some(local) => {
                local.len() == self.global_work.len()
                    && self.global_work.iter().zip(local).all(|(global, local)| *local > 0 && global % local == 0)
            }
            None => true,
        }
    }

    /// Global/local sizes padded to three dimensions, as consumed by enqueue APIs.
    pub fn dispatch_sizes(&self) -> ([usize; MAX_DIMS], Option<[usize; MAX_DIMS]>) {
        (pad(&self.global_work), self.local_work.as_deref().map(pad))
    }

    /// Human-readable launch summary for `device`.
    pub fn thread_info<'a>(&'a self, task: &'a str, device: &'a DeviceCapabilities) -> ThreadInfo<'a> {
        ThreadInfo { task, device, plan: self }
    }
}

fn pad(sizes: &[usize]) -> [usize; MAX_DIMS] {
    let mut padded = [1; MAX_DIMS];
    padded[..sizes.len()].copy_from_slice(sizes);
    padded
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (offset, global) = (self.global_offset.as_slice(), self.global_work.as_slice());
        write!(f, "dims={} offset={offset:?} global={global:?}", self.dims())?;
        match &self.local_work {
            Some(local) => write!(f, " local={:?}", local.as_slice()),
            None => write!(f, " local=driver"),
        }
    }
}

/// Thread-info dump of a plan (see [`LaunchPlan::thread_info`]).
pub struct ThreadInfo<'a> {
    task: &'a str,
    device: &'a DeviceCapabilities,
    plan: &'a LaunchPlan,
}

impl fmt::Display for ThreadInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        writeln!(f, "Task info: {}", self.task)?;
        writeln!(f, "\tBackend           : {}", self.device.id.backend)?;
        writeln!(f, "\tDevice            : {} ({})", self.device.name, self.device.id)?;
        writeln!(f, "\tDims              : {}", plan.dims())?;
        writeln!(f, "\tGlobal work offset: {:?}", plan.global_offset.as_slice())?;
        writeln!(f, "\tGlobal work size  : {:?}", plan.global_work.as_slice())?;
        match (&plan.local_work, plan.work_groups()) {
            (Some(local), Some(groups)) => {
                writeln!(f, "\tLocal  work size  : {:?}", local.as_slice())?;
                write!(f, "\tNumber of workgroups  : {:?}", groups.as_slice())
            }
            _ => write!(f, "\tLocal  work size  : null (driver default)"),
        }
    }
}
