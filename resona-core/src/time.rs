//! Duration conversion helpers with explicit saturation behavior.

use std::time::Duration;

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    ///
    /// In practice always safe: `u64::MAX` milliseconds is ~584 million years.
    fn as_millis_u64(&self) -> u64;

    /// Convert duration to seconds as u32, saturating at `u32::MAX`.
    ///
    /// In practice always safe for audio tracks: `u32::MAX` seconds is
    /// approximately 136 years.
    fn as_secs_u32(&self) -> u32;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }

    fn as_secs_u32(&self) -> u32 {
        u32::try_from(self.as_secs()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_millis_u64() {
        let duration = Duration::from_millis(1234);
        assert_eq!(duration.as_millis_u64(), 1234);
    }

    #[test]
    fn test_as_millis_u64_zero() {
        assert_eq!(Duration::ZERO.as_millis_u64(), 0);
    }

    #[test]
    fn test_as_secs_u32() {
        let duration = Duration::from_secs(183);
        assert_eq!(duration.as_secs_u32(), 183);
    }

    #[test]
    fn test_as_secs_u32_saturates() {
        let duration = Duration::from_secs(u64::from(u32::MAX) + 10);
        assert_eq!(duration.as_secs_u32(), u32::MAX);
    }
}
