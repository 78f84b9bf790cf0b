use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct TimeUtility;

impl TimeUtility {
    const NANOS_PER_SEC: i64 = 1_000_000_000;

    /// Splits an instant into whole seconds since the epoch and the
    /// nanosecond remainder, with the remainder always in `[0, 1e9)`.
    ///
    /// Seconds are floored, so instants before the epoch get a negative
    /// second count and a positive remainder.
    pub fn to_unix_parts(t: SystemTime) -> (i64, i64) {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => (
                i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
                i64::from(d.subsec_nanos()),
            ),
            Err(e) => {
                let d = e.duration();
                let secs = i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
                let nanos = i64::from(d.subsec_nanos());
                if nanos == 0 {
                    (-secs, 0)
                } else {
                    (-secs - 1, Self::NANOS_PER_SEC - nanos)
                }
            }
        }
    }

    /// Inverse of [`TimeUtility::to_unix_parts`]. An out of range remainder is
    /// carried into the seconds; an unrepresentable instant yields the epoch.
    pub fn from_unix_parts(sec: i64, nsec: i64) -> SystemTime {
        let sec = sec.saturating_add(nsec.div_euclid(Self::NANOS_PER_SEC));
        let nsec = nsec.rem_euclid(Self::NANOS_PER_SEC) as u64;
        let t = if sec >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(sec as u64))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(sec.unsigned_abs()))
        };
        t.and_then(|t| t.checked_add(Duration::from_nanos(nsec)))
            .unwrap_or(UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_and_known_instants() {
        assert_eq!(TimeUtility::to_unix_parts(UNIX_EPOCH), (0, 0));
        let t = UNIX_EPOCH + Duration::new(1_500_000_000, 123_456_789);
        assert_eq!(TimeUtility::to_unix_parts(t), (1_500_000_000, 123_456_789));
        assert_eq!(TimeUtility::from_unix_parts(1_500_000_000, 123_456_789), t);
    }

    #[test]
    fn test_pre_epoch_floors_seconds() {
        let t = UNIX_EPOCH - Duration::new(1, 250_000_000);
        assert_eq!(TimeUtility::to_unix_parts(t), (-2, 750_000_000));
        assert_eq!(TimeUtility::from_unix_parts(-2, 750_000_000), t);

        let whole = UNIX_EPOCH - Duration::from_secs(5);
        assert_eq!(TimeUtility::to_unix_parts(whole), (-5, 0));
    }

    #[test]
    fn test_remainder_overflow_is_carried() {
        assert_eq!(
            TimeUtility::from_unix_parts(1, 1_500_000_000),
            UNIX_EPOCH + Duration::new(2, 500_000_000)
        );
        assert_eq!(
            TimeUtility::from_unix_parts(0, -1),
            UNIX_EPOCH - Duration::from_nanos(1)
        );
    }

    proptest! {
        #[test]
        fn prop_after_epoch_round_trip(secs in 0u64..100_000_000_000, nanos in 0u32..1_000_000_000) {
            let t = UNIX_EPOCH + Duration::new(secs, nanos);
            let (s, n) = TimeUtility::to_unix_parts(t);
            prop_assert!((0..1_000_000_000).contains(&n));
            prop_assert_eq!(TimeUtility::from_unix_parts(s, n), t);
        }

        #[test]
        fn prop_before_epoch_round_trip(secs in 0u64..1_000_000_000, nanos in 0u32..1_000_000_000) {
            let t = UNIX_EPOCH - Duration::new(secs, nanos);
            let (s, n) = TimeUtility::to_unix_parts(t);
            prop_assert!((0..1_000_000_000).contains(&n));
            prop_assert_eq!(TimeUtility::from_unix_parts(s, n), t);
        }
    }
}
