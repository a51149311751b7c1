//! OSC controller core
//!
//! Timestamp-ordered state for faders, encoders and buttons driven by an
//! OSC-like message stream. The transport hands in an address, a value and a
//! timestamp; the core decides whether the reading is accepted and returns
//! the authoritative value to re-emit.

pub mod config;
pub mod controller;
pub mod error;
pub mod registry;
pub mod replay;

pub use controller::{
    Controller, ControllerFactory, ControllerMode, ControllerType, UpdateOutcome,
    DEFAULT_ENCODER_SENSITIVITY,
};
pub use error::ControllerError;
pub use registry::{ControllerRegistry, ControllerSnapshot, Feedback, SharedRegistry};
