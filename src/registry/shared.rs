//! Thread-safe registry handle
//!
//! Controllers have no internal locking; this wrapper serializes every access
//! through one lock per registry.

use std::sync::Arc;

use parking_lot::Mutex;

use super::feedback::{ControllerSnapshot, Feedback};
use super::store::ControllerRegistry;
use crate::controller::ControllerMode;

/// Cloneable handle to a registry shared between threads
#[derive(Clone, Debug)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ControllerRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ControllerRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Route one reading, see [`ControllerRegistry::handle`]
    pub fn handle(
        &self,
        address: &str,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Option<Feedback> {
        self.inner.lock().handle(address, controller_id, mode, value, ts)
    }

    pub fn snapshot(&self) -> Vec<ControllerSnapshot> {
        self.inner.lock().snapshot()
    }

    /// Run `f` with exclusive access to the registry
    pub fn with<R>(&self, f: impl FnOnce(&mut ControllerRegistry) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
