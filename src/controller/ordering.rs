//! Timestamp ordering policy
//!
//! Every controller variant gates its updates through the same rule: the
//! sentinel timestamp `0` always applies, anything else must be strictly
//! newer than the stored timestamp.

/// Timestamp meaning "unconditional local override"
pub const UNCONDITIONAL: u32 = 0;

/// How an incoming timestamp relates to the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Sentinel timestamp, bypasses ordering
    Forced,
    /// Strictly newer than the stored timestamp
    Newer,
    /// Equal to or older than the stored timestamp
    Stale,
}

impl Eligibility {
    /// Classify an incoming timestamp against the stored one
    pub fn of(incoming: u32, stored: u32) -> Self {
        if incoming == UNCONDITIONAL {
            Eligibility::Forced
        } else if incoming > stored {
            Eligibility::Newer
        } else {
            Eligibility::Stale
        }
    }
}

/// Whether an update with `incoming` may be applied over `stored`
pub fn is_eligible(incoming: u32, stored: u32) -> bool {
    !matches!(Eligibility::of(incoming, stored), Eligibility::Stale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_always_eligible() {
        assert_eq!(Eligibility::of(0, 0), Eligibility::Forced);
        assert_eq!(Eligibility::of(0, u32::MAX), Eligibility::Forced);
        assert!(is_eligible(0, 42));
    }

    #[test]
    fn test_strictly_newer() {
        assert_eq!(Eligibility::of(11, 10), Eligibility::Newer);
        assert_eq!(Eligibility::of(10, 10), Eligibility::Stale);
        assert_eq!(Eligibility::of(9, 10), Eligibility::Stale);
        assert!(is_eligible(1, 0));
        assert!(!is_eligible(u32::MAX, u32::MAX));
    }
}
