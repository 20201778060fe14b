//! User-specified worker grids.
//!
//! A [`WorkerGrid`] bypasses strategy computation entirely. It is still subject
//! to the device fit-check in [`crate::fit`] before launch.

use gridwise_device::{Dims, MAX_DIMS};
use smallvec::smallvec;
use snafu::ensure;

use crate::error::{InvalidWorkerGridSnafu, Result};
use crate::plan::LaunchPlan;

/// Explicit global/local/offset launch parameters with a fixed dimensionality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerGrid {
    global_offset: Dims,
    global_work: Dims,
    local_work: Option<Dims>,
}

impl WorkerGrid {
    /// Grid with the given global work, no offset and driver-chosen local work.
    pub fn new(global_work: &[usize]) -> Result<Self> {
        ensure!(
            (1..=MAX_DIMS).contains(&global_work.len()),
            InvalidWorkerGridSnafu { reason: "a worker grid has between 1 and 3 dimensions" }
        );
        ensure!(!global_work.contains(&0), InvalidWorkerGridSnafu { reason: "global work sizes must be positive" });

        Ok(Self {
            global_offset: smallvec![0; global_work.len()],
            global_work: Dims::from_slice(global_work),
            local_work: None,
        })
    }

    pub fn new_1d(x: usize) -> Result<Self> {
        Self::new(&[x])
    }

    pub fn new_2d(x: usize, y: usize) -> Result<Self> {
        Self::new(&[x, y])
    }

    pub fn new_3d(x: usize, y: usize, z: usize) -> Result<Self> {
        Self::new(&[x, y, z])
    }

    /// Set the local work size (builder style).
    pub fn with_local_work(mut self, local_work: &[usize]) -> Result<Self> {
        self.set_local_work(local_work)?;
        Ok(self)
    }

    /// Set the global offset (builder style).
    pub fn with_global_offset(mut self, global_offset: &[usize]) -> Result<Self> {
        self.set_global_offset(global_offset)?;
        Ok(self)
    }

    pub fn set_global_work(&mut self, global_work: &[usize]) -> Result<()> {
        self.check_dims(global_work)?;
        ensure!(!global_work.contains(&0), InvalidWorkerGridSnafu { reason: "global work sizes must be positive" });
        self.global_work = Dims::from_slice(global_work);
        Ok(())
    }

    pub fn set_local_work(&mut self, local_work: &[usize]) -> Result<()> {
        self.check_dims(local_work)?;
        ensure!(!local_work.contains(&0), InvalidWorkerGridSnafu { reason: "local work sizes must be positive" });
        self.local_work = Some(Dims::from_slice(local_work));
        Ok(())
    }

    pub fn set_global_offset(&mut self, global_offset: &[usize]) -> Result<()> {
        self.check_dims(global_offset)?;
        self.global_offset = Dims::from_slice(global_offset);
        Ok(())
    }

    /// Defer the local work size to the driver.
    pub fn clear_local_work(&mut self) {
        self.local_work = None;
    }

    pub fn dims(&self) -> usize {
        self.global_work.len()
    }

    pub fn global_work(&self) -> &[usize] {
        &self.global_work
    }

    pub fn local_work(&self) -> Option<&[usize]> {
        self.local_work.as_deref()
    }

    pub fn global_offset(&self) -> &[usize] {
        &self.global_offset
    }

    /// The grid as a launch plan, verbatim.
    pub fn to_plan(&self) -> LaunchPlan {
        LaunchPlan {
            global_offset: self.global_offset.clone(),
            global_work: self.global_work.clone(),
            local_work: self.local_work.clone(),
        }
    }

    fn check_dims(&self, sizes: &[usize]) -> Result<()> {
        ensure!(
            sizes.len() == self.dims(),
            InvalidWorkerGridSnafu { reason: "sizes must match the grid dimensionality" }
        );
        Ok(())
    }
}
