//! Button update rule

use super::ordering::Eligibility;
use super::types::UpdateOutcome;
use super::Reading;

/// Offer a reading to a button
///
/// Ordered readings are clamped to [0, 1]; a sentinel reading is stored
/// verbatim.
pub(super) fn apply(state: &mut Reading, value: f32, ts: u32) -> UpdateOutcome {
    match Eligibility::of(ts, state.ts) {
        Eligibility::Forced => state.set(value, ts),
        Eligibility::Newer => state.set(value.clamp(0.0, 1.0), ts),
        Eligibility::Stale => return UpdateOutcome::Stale,
    }

    UpdateOutcome::stored(state.value)
}
