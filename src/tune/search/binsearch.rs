//! Integer bisection between a fitting and an exhausting batch size

/// Midpoint of an open interval `(low, high)` with `high - low > 1`
///
/// Always strictly between the two ends.
pub(crate) fn midpoint(low: usize, high: usize) -> usize {
    debug_assert!(high > low + 1, "interval ({low}, {high}) is already collapsed");
    low + (high - low) / 2
}

/// Whether `(low, high)` has collapsed to adjacent integers
pub(crate) fn collapsed(low: usize, high: usize) -> bool {
    high <= low + 1
}
