//! ControllerRegistry - address-keyed controller storage with subscriptions

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::feedback::{ControllerSnapshot, Feedback};
use crate::controller::{Controller, ControllerFactory, ControllerMode, UpdateOutcome};
use crate::error::ControllerError;

/// Subscriber callback, called with every accepted reading
pub type SubscriberFn = Arc<dyn Fn(&Feedback) + Send + Sync>;

/// Owns controllers by address and routes readings to them
pub struct ControllerRegistry {
    factory: ControllerFactory,
    controllers: HashMap<String, Controller>,
    subscribers: Vec<SubscriberFn>,
}

impl ControllerRegistry {
    /// Create an empty registry that builds controllers with `factory`
    pub fn new(factory: ControllerFactory) -> Self {
        Self {
            factory,
            controllers: HashMap::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn factory(&self) -> &ControllerFactory {
        &self.factory
    }

    /// Route one reading
    ///
    /// An address seen for the first time creates its controller, seeded
    /// with the reading. Returns `None` when the address matches no variant,
    /// in which case the message should be dropped.
    pub fn handle(
        &mut self,
        address: &str,
        controller_id: i32,
        mode: ControllerMode,
        value: f32,
        ts: u32,
    ) -> Option<Feedback> {
        let feedback = match self.controllers.get_mut(address) {
            Some(controller) => {
                let outcome = controller.apply(value, ts);
                trace!("{} {} <- {} @{}: {:?}", controller.type_tag(), address, value, ts, outcome);
                Feedback::new(controller, outcome, false)
            }
            None => {
                let controller = self.factory.create(address, controller_id, mode, value, ts)?;
                let outcome = UpdateOutcome::stored(controller.value());
                let feedback = Feedback::new(&controller, outcome, true);
                self.controllers.insert(address.to_string(), controller);
                feedback
            }
        };

        if feedback.accepted() {
            for subscriber in &self.subscribers {
                subscriber(&feedback);
            }
        }

        Some(feedback)
    }

    /// Add an already-built controller, replacing any at the same address
    pub fn insert(&mut self, controller: Controller) -> Option<Controller> {
        debug!("Registering {} controller {}", controller.type_tag(), controller.address());
        self.controllers.insert(controller.address().to_string(), controller)
    }

    pub fn get(&self, address: &str) -> Option<&Controller> {
        self.controllers.get(address)
    }

    pub fn get_mut(&mut self, address: &str) -> Option<&mut Controller> {
        self.controllers.get_mut(address)
    }

    /// Change the sensitivity of the controller at `address`
    ///
    /// Faders and buttons ignore the change.
    pub fn set_sensitivity(&mut self, address: &str, sensitivity: i32) -> Result<(), ControllerError> {
        let controller = self
            .controllers
            .get_mut(address)
            .ok_or_else(|| ControllerError::NotFound(address.to_string()))?;
        controller.set_sensitivity(sensitivity);
        Ok(())
    }

    /// Discard the controller at `address`
    pub fn remove(&mut self, address: &str) -> Option<Controller> {
        self.controllers.remove(address)
    }

    /// Discard every controller (session teardown)
    pub fn clear(&mut self) {
        debug!("Clearing {} controllers", self.controllers.len());
        self.controllers.clear();
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Snapshot of every controller, sorted by address
    pub fn snapshot(&self) -> Vec<ControllerSnapshot> {
        let mut snapshots: Vec<ControllerSnapshot> =
            self.controllers.values().map(ControllerSnapshot::from).collect();
        snapshots.sort_by(|a, b| a.address.cmp(&b.address));
        snapshots
    }

    /// Subscribe to accepted readings
    ///
    /// Returns the subscriber index.
    pub fn subscribe<F>(&mut self, listener: F) -> usize
    where
        F: Fn(&Feedback) + Send + Sync + 'static,
    {
        self.subscribers.push(Arc::new(listener));
        self.subscribers.len() - 1
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new(ControllerFactory::default())
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("factory", &self.factory)
            .field("controllers", &self.controllers.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_first_message_creates_controller() {
        let mut registry = ControllerRegistry::default();

        let feedback = registry
            .handle("/ch1/fader", 1, ControllerMode::Direct, 0.4, 10)
            .unwrap();

        assert!(feedback.created);
        assert_eq!(feedback.outcome, UpdateOutcome::Applied);
        assert_eq!(feedback.value(), 0.4);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("/ch1/fader").unwrap().timestamp(), 10);
    }

    #[test]
    fn test_later_messages_update_existing() {
        let mut registry = ControllerRegistry::default();
        registry.handle("/ch1/button", 1, ControllerMode::Toggle, 0.0, 10);

        let feedback = registry
            .handle("/ch1/button", 1, ControllerMode::Toggle, 4.0, 11)
            .unwrap();
        assert!(!feedback.created);
        assert_eq!(feedback.value(), 1.0);

        let stale = registry
            .handle("/ch1/button", 1, ControllerMode::Toggle, 0.0, 9)
            .unwrap();
        assert_eq!(stale.outcome, UpdateOutcome::Stale);
        assert_eq!(stale.value(), 1.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unrecognized_address_dropped() {
        let mut registry = ControllerRegistry::default();

        assert!(registry
            .handle("/ch1/knob", 1, ControllerMode::Direct, 0.5, 1)
            .is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscribers_see_accepted_only() {
        let mut registry = ControllerRegistry::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        registry.subscribe(move |feedback| {
            sink.lock().unwrap().push((feedback.controller.address.clone(), feedback.value()));
        });

        registry.handle("/a/encoder", 1, ControllerMode::Direct, 0.5, 1);
        registry.handle("/a/encoder", 1, ControllerMode::Direct, 10.0, 2);
        registry.handle("/a/encoder", 1, ControllerMode::Direct, 10.0, 2);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("/a/encoder".to_string(), 0.5));
        assert!((seen[1].1 - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_set_sensitivity_and_remove() {
        let mut registry = ControllerRegistry::default();
        registry.handle("/a/encoder", 1, ControllerMode::Direct, 0.0, 1);

        registry.set_sensitivity("/a/encoder", 10).unwrap();
        assert_eq!(registry.get("/a/encoder").unwrap().sensitivity(), 10);

        assert_eq!(
            registry.set_sensitivity("/missing/encoder", 10),
            Err(ControllerError::NotFound("/missing/encoder".to_string()))
        );

        assert!(registry.remove("/a/encoder").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_sorted() {
        let mut registry = ControllerRegistry::default();
        registry.handle("/z/fader", 3, ControllerMode::Direct, 0.1, 1);
        registry.handle("/a/button", 1, ControllerMode::Direct, 1.0, 1);
        registry.handle("/m/encoder", 2, ControllerMode::Direct, 0.5, 1);

        let addresses: Vec<_> = registry
            .snapshot()
            .into_iter()
            .map(|s| s.address)
            .collect();
        assert_eq!(addresses, vec!["/a/button", "/m/encoder", "/z/fader"]);

        registry.clear();
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_feedback_json_shape() {
        let mut registry = ControllerRegistry::default();
        let feedback = registry
            .handle("/ch1/encoder", 4, ControllerMode::Direct, 0.25, 0)
            .unwrap();

        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(json["address"], "/ch1/encoder");
        assert_eq!(json["type"], "encoder");
        assert_eq!(json["outcome"], "applied");
        assert_eq!(json["sensitivity"], 100);
        assert_eq!(json["created"], true);
    }
}
