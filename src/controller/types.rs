//! Controller type definitions
//!
//! Defines the controller variants, input modes and update outcomes shared by
//! every controller.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ControllerError;

/// Default divisor applied to relative encoder input
pub const DEFAULT_ENCODER_SENSITIVITY: i32 = 100;

/// How raw input is interpreted by faders and buttons
///
/// Encoders ignore this and always run in `Direct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    /// Value follows the input
    #[default]
    Direct,
    /// Take over once the input reaches the current value
    Pickup1,
    /// Take over once the input crosses the current value
    Pickup2,
    /// Each press flips between 0 and 1
    Toggle,
    /// Each press flips between 0 and the pressed value
    ToggleValue,
}

impl ControllerMode {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerMode::Direct => "direct",
            ControllerMode::Pickup1 => "pickup1",
            ControllerMode::Pickup2 => "pickup2",
            ControllerMode::Toggle => "toggle",
            ControllerMode::ToggleValue => "toggle_value",
        }
    }
}

impl std::fmt::Display for ControllerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ControllerMode {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ControllerMode::Direct),
            "pickup1" => Ok(ControllerMode::Pickup1),
            "pickup2" => Ok(ControllerMode::Pickup2),
            "toggle" => Ok(ControllerMode::Toggle),
            "toggle_value" | "toggle-value" => Ok(ControllerMode::ToggleValue),
            other => Err(ControllerError::UnknownMode(other.to_string())),
        }
    }
}

/// Controller variant, selected from the address suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerType {
    /// Absolute position, `/fader`
    Fader,
    /// Relative rotation, `/encoder`
    Encoder,
    /// Momentary or latching switch, `/button`
    Button,
}

impl ControllerType {
    /// All variants in address-matching priority order
    pub fn all() -> &'static [ControllerType] {
        &[
            ControllerType::Fader,
            ControllerType::Encoder,
            ControllerType::Button,
        ]
    }

    /// Address suffix that selects this variant
    pub fn suffix(&self) -> &'static str {
        match self {
            ControllerType::Fader => "/fader",
            ControllerType::Encoder => "/encoder",
            ControllerType::Button => "/button",
        }
    }

    /// Short tag identifying the variant ("FDR", "ENC", "BTN")
    pub fn tag(&self) -> &'static str {
        match self {
            ControllerType::Fader => "FDR",
            ControllerType::Encoder => "ENC",
            ControllerType::Button => "BTN",
        }
    }
}

impl std::fmt::Display for ControllerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Result of offering a reading to a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Stored, and the stored value is inside [0, 1]
    Applied,
    /// Stored, but the stored value is outside [0, 1] or not finite
    AppliedOutOfRange,
    /// Ignored: timestamp not newer than the stored one
    Stale,
}

impl UpdateOutcome {
    /// Outcome for a value that has just been stored
    pub(crate) fn stored(value: f32) -> Self {
        if (0.0..=1.0).contains(&value) {
            UpdateOutcome::Applied
        } else {
            UpdateOutcome::AppliedOutOfRange
        }
    }

    /// Whether this call changed the stored state
    pub fn is_applied(&self) -> bool {
        !matches!(self, UpdateOutcome::Stale)
    }
}
