//! Power-of-two stepping

/// Next size when growing: double, never past `max`
pub(crate) fn grow(current: usize, max: usize) -> usize {
    current.saturating_mul(2).min(max)
}

/// Next size when shrinking: halve, never below `min`
pub(crate) fn shrink(current: usize, min: usize) -> usize {
    (current / 2).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_doubles_and_clamps() {
        assert_eq!(grow(1, 1000), 2);
        assert_eq!(grow(256, 1000), 512);
        assert_eq!(grow(512, 1000), 1000);
        assert_eq!(grow(usize::MAX / 2 + 1, usize::MAX), usize::MAX);
    }

    #[test]
    fn test_shrink_halves_and_clamps() {
        assert_eq!(shrink(64, 1), 32);
        assert_eq!(shrink(3, 1), 1);
        assert_eq!(shrink(10, 8), 8);
        assert_eq!(shrink(1, 1), 1);
    }
}
