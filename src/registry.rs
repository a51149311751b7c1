//! Registry module - controllers keyed by address
//!
//! The registry owns every live controller, creates new ones through the
//! factory the first time an address is seen, and notifies subscribers with
//! the authoritative value after each accepted reading.

mod feedback;
mod shared;
mod store;

pub use feedback::{ControllerSnapshot, Feedback};
pub use shared::SharedRegistry;
pub use store::{ControllerRegistry, SubscriberFn};
