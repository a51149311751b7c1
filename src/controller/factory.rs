//! Controller factory - address suffix dispatch
//!
//! The address suffix decides the variant: `/fader`, `/encoder` or `/button`,
//! matched case-sensitively in that order.

use tracing::{debug, info};

use super::types::{ControllerMode, ControllerType, DEFAULT_ENCODER_SENSITIVITY};
use super::Controller;
use crate::error::ControllerError;

/// Classify an address by its suffix
pub fn classify(address: &str) -> Option<ControllerType> {
    ControllerType::all()
        .iter()
        .copied()
        .find(|kind| address.ends_with(kind.suffix()))
}

/// Builds controllers from addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerFactory {
    /// Sensitivity given to newly created encoders
    encoder_sensitivity: i32,
}

impl ControllerFactory {
    /// Create a factory with the default encoder sensitivity
    pub fn new() -> Self {
        Self::with_encoder_sensitivity(DEFAULT_ENCODER_SENSITIVITY)
    }

    /// Create a factory whose encoders start with `sensitivity`
    pub fn with_encoder_sensitivity(sensitivity: i32) -> Self {
        Self {
            encoder_sensitivity: sensitivity,
        }
    }

    pub fn encoder_sensitivity(&self) -> i32 {
        self.encoder_sensitivity
    }

    /// Create the controller matching `address`, seeded with `value` at `ts`
    ///
    /// Returns `None` for an unrecognized address; the caller should drop the
    /// message.
    pub fn create(
        &self,
        address: &str,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Option<Controller> {
        match self.try_create(address, controller_id, mode, value, ts) {
            Ok(controller) => Some(controller),
            Err(e) => {
                info!("{}", e);
                None
            }
        }
    }

    /// Like [`ControllerFactory::create`], reporting an unrecognized address
    /// as an error
    pub fn try_create(
        &self,
        address: &str,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Result<Controller, ControllerError> {
        let kind = classify(address)
            .ok_or_else(|| ControllerError::UnrecognizedAddress(address.to_string()))?;

        let controller = match kind {
            ControllerType::Fader => Controller::fader(address, controller_id, mode, value, ts),
            ControllerType::Encoder => {
                Controller::encoder(address, controller_id, value, ts, self.encoder_sensitivity)
            }
            ControllerType::Button => Controller::button(address, controller_id, mode, value, ts),
        };

        debug!(
            "Created {} controller {} (id={}, value={}, ts={})",
            kind, address, controller_id, value, ts
        );
        Ok(controller)
    }
}

impl Default for ControllerFactory {
    fn default() -> Self {
        Self::new()
    }
}
