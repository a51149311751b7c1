//! Encoder update rule
//!
//! Ordered readings are relative ticks, scaled down by the sensitivity and
//! accumulated into an absolute value clamped to [0, 1]. A sentinel reading
//! sets the absolute value directly and skips the clamp.
//!
//! A sensitivity of 0 is not guarded: the delta becomes infinite (or NaN for a
//! zero tick) and the stored value follows.

use super::ordering::Eligibility;
use super::types::UpdateOutcome;
use super::Reading;

/// Offer a reading to an encoder
pub(super) fn apply(state: &mut Reading, sensitivity: i32, value: f32, ts: u32) -> UpdateOutcome {
    match Eligibility::of(ts, state.ts) {
        Eligibility::Forced => {
            state.set(value, ts);
        }
        Eligibility::Newer => {
            let accumulated = state.value + value / sensitivity as f32;
            state.set(accumulated.clamp(0.0, 1.0), ts);
        }
        Eligibility::Stale => return UpdateOutcome::Stale,
    }

    UpdateOutcome::stored(state.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::types::DEFAULT_ENCODER_SENSITIVITY;

    #[test]
    fn test_delta_accumulates_and_clamps() {
        let mut state = Reading::new(0.5, 1);

        assert_eq!(
            apply(&mut state, DEFAULT_ENCODER_SENSITIVITY, 50.0, 2),
            UpdateOutcome::Applied
        );
        assert_eq!(state.value, 1.0);
        assert_eq!(state.ts, 2);

        apply(&mut state, DEFAULT_ENCODER_SENSITIVITY, -25.0, 3);
        assert!((state.value - 0.75).abs() < 1e-6);

        apply(&mut state, DEFAULT_ENCODER_SENSITIVITY, -500.0, 4);
        assert_eq!(state.value, 0.0);
    }

    #[test]
    fn test_sentinel_is_absolute_and_unclamped() {
        let mut state = Reading::new(0.5, 10);

        assert_eq!(
            apply(&mut state, DEFAULT_ENCODER_SENSITIVITY, -2.0, 0),
            UpdateOutcome::AppliedOutOfRange
        );
        assert_eq!(state.value, -2.0);
        assert_eq!(state.ts, 0);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut state = Reading::new(0.3, 10);

        assert_eq!(apply(&mut state, 10, 5.0, 10), UpdateOutcome::Stale);
        assert_eq!(state.value, 0.3);
    }

    #[test]
    fn test_zero_sensitivity_goes_non_finite() {
        let mut state = Reading::new(0.3, 1);

        // Positive tick over zero is +inf, clamped to the top
        apply(&mut state, 0, 1.0, 2);
        assert_eq!(state.value, 1.0);

        // Zero tick over zero is NaN, which survives the clamp
        assert_eq!(apply(&mut state, 0, 0.0, 3), UpdateOutcome::AppliedOutOfRange);
        assert!(state.value.is_nan());
    }
}
