//! Explicit worker grids attached to tasks by name.
//!
//! Task names follow the `graph.task` convention (e.g. `"s0.t0"`). A grid
//! registered here replaces strategy computation for every task of that name.

use std::collections::HashMap;

use gridwise_schedule::WorkerGrid;

use crate::task::KernelTask;

/// Maps task names to user-specified worker grids.
#[derive(Debug, Clone, Default)]
pub struct GridScheduler {
    grids: HashMap<String, WorkerGrid>,
}

impl GridScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `grid` for `task_name`, replacing any previous grid.
    pub fn add_worker_grid(&mut self, task_name: impl Into<String>, grid: WorkerGrid) -> Option<WorkerGrid> {
        self.grids.insert(task_name.into(), grid)
    }

    pub fn get(&self, task_name: &str) -> Option<&WorkerGrid> {
        self.grids.get(task_name)
    }

    pub fn contains(&self, task_name: &str) -> bool {
        self.grids.contains_key(task_name)
    }

    pub fn remove(&mut self, task_name: &str) -> Option<WorkerGrid> {
        self.grids.remove(task_name)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Attach the grid registered for `task`, if any. Returns whether one was attached.
    pub fn apply(&self, task: &mut KernelTask) -> bool {
        match self.grids.get(task.name()) {
            Some(grid) if task.worker_grid() != Some(grid) => {
                tracing::debug!(task = task.name(), dims = grid.dims(), "attaching worker grid");
                task.set_worker_grid(Some(grid.clone()));
                true
            }
            Some(_) => true,
            None => false,
        }
    }
}
