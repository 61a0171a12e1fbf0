use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer completion percentage for a module, always within `0..=100`.
///
/// Progress for a module is monotonically non-decreasing: once persisted at a
/// value, it is never written back lower. That invariant is enforced by the
/// advancement engine, not by this type; `Progress` only guarantees the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    /// Builds a progress value, clamping out-of-range input to the bounds.
    ///
    /// The overview source is not under our control, so values outside
    /// `0..=100` are normalized rather than rejected.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Returns the percentage as an integer in `0..=100`.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_keeps_in_range_values() {
        assert_eq!(Progress::clamped(0), Progress::ZERO);
        assert_eq!(Progress::clamped(37).value(), 37);
        assert_eq!(Progress::clamped(100), Progress::COMPLETE);
    }

    #[test]
    fn test_clamped_normalizes_out_of_range() {
        assert_eq!(Progress::clamped(-5), Progress::ZERO);
        assert_eq!(Progress::clamped(150), Progress::COMPLETE);
    }

    #[test]
    fn test_is_complete() {
        assert!(Progress::COMPLETE.is_complete());
        assert!(!Progress::clamped(99).is_complete());
    }

    #[test]
    fn test_ordering_reads_as_percent_comparison() {
        assert!(Progress::clamped(25) < Progress::clamped(50));
    }
}
