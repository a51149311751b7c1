//! Output types handed back to the transport/UI layer

use serde::{Deserialize, Serialize};

use crate::controller::{Controller, ControllerMode, ControllerType, UpdateOutcome};

/// Point-in-time view of a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub address: String,
    pub controller_id: i32,
    #[serde(rename = "type")]
    pub controller_type: ControllerType,
    pub mode: ControllerMode,
    pub value: f32,
    pub ts: u32,
    pub sensitivity: i32,
}

impl From<&Controller> for ControllerSnapshot {
    fn from(controller: &Controller) -> Self {
        Self {
            address: controller.address().to_string(),
            controller_id: controller.controller_id(),
            controller_type: controller.controller_type(),
            mode: controller.mode(),
            value: controller.value(),
            ts: controller.timestamp(),
            sensitivity: controller.sensitivity(),
        }
    }
}

/// Result of routing one message through the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Controller state after the message
    #[serde(flatten)]
    pub controller: ControllerSnapshot,
    /// What the message did
    pub outcome: UpdateOutcome,
    /// Whether the controller was created by this message
    #[serde(default)]
    pub created: bool,
}

impl Feedback {
    pub(super) fn new(controller: &Controller, outcome: UpdateOutcome, created: bool) -> Self {
        Self {
            controller: ControllerSnapshot::from(controller),
            outcome,
            created,
        }
    }

    /// Authoritative value to re-emit
    pub fn value(&self) -> f32 {
        self.controller.value
    }

    /// Whether the message was applied
    pub fn accepted(&self) -> bool {
        self.outcome.is_applied()
    }
}
