//! Controller module - timestamp-ordered state for OSC control elements
//!
//! A controller holds the authoritative value of one fader, encoder or button
//! on a remote surface. Incoming readings are gated by timestamp (see
//! [`ordering`]) and then interpreted by the variant's own rule:
//!
//! - **Fader**: absolute, stored verbatim
//! - **Encoder**: relative ticks divided by a sensitivity, clamped to [0, 1]
//! - **Button**: absolute, clamped to [0, 1]
//!
//! The sentinel timestamp `0` forces a value through without ordering or
//! clamping. Construction uses the same forced path.

mod button;
mod encoder;
mod factory;
mod fader;
pub mod ordering;
mod types;


pub use factory::{classify, ControllerFactory};
pub use types::{ControllerMode, ControllerType, UpdateOutcome, DEFAULT_ENCODER_SENSITIVITY};

/// Stored value and the timestamp it was accepted with
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Reading {
    pub(crate) value: f32,
    pub(crate) ts: u32,
}

impl Reading {
    pub(crate) fn new(value: f32, ts: u32) -> Self {
        Self { value, ts }
    }

    pub(crate) fn set(&mut self, value: f32, ts: u32) {
        self.value = value;
        self.ts = ts;
    }
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ControllerKind {
    Fader,
    Encoder { sensitivity: i32 },
    Button,
}

impl ControllerKind {
    fn controller_type(&self) -> ControllerType {
        match self {
            ControllerKind::Fader => ControllerType::Fader,
            ControllerKind::Encoder { .. } => ControllerType::Encoder,
            ControllerKind::Button => ControllerType::Button,
        }
    }
}

/// One remote control element
///
/// The variant is fixed at construction. Use [`ControllerFactory`] to build
/// one from an address.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    address: String,
    controller_id: i32,
    mode: ControllerMode,
    reading: Reading,
    kind: ControllerKind,
}

impl Controller {
    /// Create a fader holding `value` at `ts`
    pub fn fader(
        address: impl Into<String>,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Self {
        Self::with_kind(address, controller_id, mode, ControllerKind::Fader, value, ts)
    }

    /// Create an encoder holding `value` at `ts`
    ///
    /// Encoders always run in [`ControllerMode::Direct`].
    pub fn encoder(
        address: impl Into<String>,
        controller_id: i32,
        value: f32,
        ts: u32,
        sensitivity: i32,
    ) -> Self {
        Self::with_kind(
            address,
            controller_id,
            ControllerMode::Direct,
            ControllerKind::Encoder { sensitivity },
            value,
            ts,
        )
    }

    /// Create a button holding `value` at `ts`
    pub fn button(
        address: impl Into<String>,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Self {
        Self::with_kind(address, controller_id, mode, ControllerKind::Button, value, ts)
    }

    fn with_kind(
        address: impl Into<String>,
        controller_id: i32,
        mode: ControllerMode,
        kind: ControllerKind,
        value: f32,
        ts: u32,
    ) -> Self {
        Self {
            address: address.into(),
            controller_id,
            mode,
            reading: Reading::new(value, ts),
            kind,
        }
    }

    /// Offer a reading and report exactly what happened
    pub fn apply(&mut self, value: f32, ts: u32) -> UpdateOutcome {
        match self.kind {
            ControllerKind::Fader => fader::apply(&mut self.reading, value, ts),
            ControllerKind::Encoder { sensitivity } => {
                encoder::apply(&mut self.reading, sensitivity, value, ts)
            }
            ControllerKind::Button => button::apply(&mut self.reading, value, ts),
        }
    }

    /// Offer a reading, returning the per-variant acceptance flag
    ///
    /// The meaning differs by variant:
    /// - fader: whether this call was applied
    /// - encoder/button: whether the stored value is `>= 0` afterwards,
    ///   regardless of whether this call changed it
    ///
    /// Prefer [`Controller::apply`] when the distinction matters.
    pub fn update(&mut self, value: f32, ts: u32) -> bool {
        let outcome = self.apply(value, ts);
        match self.kind {
            ControllerKind::Fader => outcome.is_applied(),
            ControllerKind::Encoder { .. } | ControllerKind::Button => self.is_valid(),
        }
    }

    /// Whether the stored value is non-negative
    pub fn is_valid(&self) -> bool {
        self.reading.value >= 0.0
    }

    pub fn value(&self) -> f32 {
        self.reading.value
    }

    pub fn timestamp(&self) -> u32 {
        self.reading.ts
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn controller_id(&self) -> i32 {
        self.controller_id
    }

    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    pub fn controller_type(&self) -> ControllerType {
        self.kind.controller_type()
    }

    /// Short variant tag ("FDR", "ENC", "BTN")
    pub fn type_tag(&self) -> &'static str {
        self.controller_type().tag()
    }

    /// Change the encoder divisor; ignored by faders and buttons
    ///
    /// A value of 0 is accepted and makes later ticks non-finite.
    pub fn set_sensitivity(&mut self, sensitivity: i32) {
        if let ControllerKind::Encoder { sensitivity: current } = &mut self.kind {
            *current = sensitivity;
        }
    }

    /// Encoder divisor
    ///
    /// Faders and buttons report [`DEFAULT_ENCODER_SENSITIVITY`].
    pub fn sensitivity(&self) -> i32 {
        match self.kind {
            ControllerKind::Encoder { sensitivity } => sensitivity,
            ControllerKind::Fader | ControllerKind::Button => DEFAULT_ENCODER_SENSITIVITY,
        }
    }
}
