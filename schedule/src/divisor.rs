//! Divisor search shared by the GPU and FPGA strategies.
//!
//! Every local work size must divide its global work size, so local sizes are
//! chosen as the largest divisor of the global size under a hardware bound. The
//! search is a linear scan downwards from the bound; bounds are at most a few
//! thousand work-items.

/// Local group size for one dimension.
///
/// 1. A bound equal to the global size is halved (full-occupancy groups misbehave
///    on some drivers).
/// 2. The candidate is `min(max(bound, custom_block_size), global_work_size)`.
/// 3. The candidate is decremented until it divides `global_work_size`.
///
/// Returns 1 when the candidate is 0.
pub fn calculate_group_size(bound: usize, custom_block_size: usize, global_work_size: usize) -> usize {
    let bound = if bound == global_work_size { bound / 2 } else { bound };
    largest_divisor_at_most(bound.max(custom_block_size), global_work_size)
}

/// Largest divisor of `value` that is at most `bound`, or 1 if `bound` or `value` is 0.
pub fn largest_divisor_at_most(bound: usize, value: usize) -> usize {
    let mut candidate = bound.min(value);
    if candidate == 0 {
        return 1;
    }
    while !value.is_multiple_of(candidate) {
        candidate -= 1;
    }
    tracing::trace!(bound, value, divisor = candidate, "divisor search");
    candidate
}
