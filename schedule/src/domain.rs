//! Iteration domains.
//!
//! An [`IterationDomain`] is the logical index space of a parallel loop nest as
//! recovered by program analysis: up to three dimensions, each with an offset,
//! stride and cardinality (trip count). The scheduler only reads cardinalities;
//! offset and stride are applied by the generated kernel.

use std::num::NonZeroUsize;

use gridwise_device::{Dims, MAX_DIMS};
use smallvec::SmallVec;
use snafu::ensure;

use crate::error::{Result, TooManyDimensionsSnafu, ZeroCardinalitySnafu};

/// One dimension of an iteration domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainDim {
    pub offset: i64,
    pub stride: i64,
    pub cardinality: usize,
}

impl DomainDim {
    pub const fn new(offset: i64, stride: i64, cardinality: usize) -> Self {
        Self { offset, stride, cardinality }
    }

    /// Dimension `0..cardinality` with unit stride.
    pub const fn range(cardinality: usize) -> Self {
        Self::new(0, 1, cardinality)
    }
}

/// Immutable description of the logical index space of a parallel computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationDomain {
    dims: SmallVec<[DomainDim; MAX_DIMS]>,
}

impl IterationDomain {
    /// Create a domain, validating depth and cardinalities.
    pub fn new(dims: impl IntoIterator<Item = DomainDim>) -> Result<Self> {
        let dims: SmallVec<[DomainDim; MAX_DIMS]> = dims.into_iter().collect();
        ensure!(dims.len() <= MAX_DIMS, TooManyDimensionsSnafu { depth: dims.len(), max: MAX_DIMS });
        if let Some(dimension) = dims.iter().position(|dim| dim.cardinality == 0) {
            return ZeroCardinalitySnafu { dimension }.fail();
        }
        Ok(Self { dims })
    }

    /// Domain of `0..n` ranges with unit strides.
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        Self::new(shape.iter().map(|&cardinality| DomainDim::range(cardinality)))
    }

    /// Number of dimensions (0 for a scalar task).
    pub fn depth(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[DomainDim] {
        &self.dims
    }

    pub fn get(&self, dim: usize) -> Option<&DomainDim> {
        self.dims.get(dim)
    }

    /// Number of launch dimensions. A scalar task still launches along one dimension.
    pub fn launch_depth(&self) -> usize {
        self.depth().max(1)
    }

    /// Cardinalities used for one launch.
    ///
    /// A batch override replaces every dimension's cardinality; a scalar task
    /// yields a single dimension of one element.
    pub fn launch_cardinalities(&self, batch: Option<BatchOverride>) -> Dims {
        if self.dims.is_empty() {
            return Dims::from_slice(&[batch.map_or(1, BatchOverride::get)]);
        }
        self.dims.iter().map(|dim| batch.map_or(dim.cardinality, BatchOverride::get)).collect()
    }

    /// Total number of points in the domain, saturating at `usize::MAX`.
    pub fn size(&self) -> usize {
        self.dims.iter().try_fold(1usize, |acc, dim| acc.checked_mul(dim.cardinality)).unwrap_or(usize::MAX)
    }
}

/// Element count substituted for every dimension's cardinality for one launch.
///
/// Supplied by the memory-chunking layer when an oversized domain is split into
/// device-resident batches. It never alters offsets or strides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchOverride(NonZeroUsize);

impl BatchOverride {
    /// Returns `None` for zero, which means "no override".
    pub const fn new(threads: usize) -> Option<Self> {
        match NonZeroUsize::new(threads) {
            Some(threads) => Some(Self(threads)),
            None => None,
        }
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for BatchOverride {
    fn from(threads: NonZeroUsize) -> Self {
        Self(threads)
    }
}
