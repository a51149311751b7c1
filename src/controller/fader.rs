//! Fader update rule
//!
//! Fader input is absolute and already scaled by the sender, so an eligible
//! reading is stored as-is.

use super::ordering::is_eligible;
use super::types::UpdateOutcome;
use super::Reading;

/// Offer a reading to a fader
pub(super) fn apply(state: &mut Reading, value: f32, ts: u32) -> UpdateOutcome {
    if !is_eligible(ts, state.ts) {
        return UpdateOutcome::Stale;
    }

    state.set(value, ts);
    UpdateOutcome::stored(value)
}
