//! Configuration management
//!
//! Handles loading, parsing and validation of the YAML configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::controller::{classify, ControllerFactory, ControllerMode, DEFAULT_ENCODER_SENSITIVITY};
use crate::registry::ControllerRegistry;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controllers: Vec<PresetController>,
}

/// Encoder defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// Divisor given to newly created encoders
    #[serde(default = "default_sensitivity")]
    pub default_sensitivity: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            default_sensitivity: default_sensitivity(),
        }
    }
}

/// Logging defaults (the command line and `RUST_LOG` take precedence)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Controller registered at start-up, before any message arrives
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PresetController {
    pub address: String,
    pub id: i32,
    #[serde(default)]
    pub mode: ControllerMode,
    #[serde(default)]
    pub value: f32,
    /// Encoder-only override of the default sensitivity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<i32>,
}

impl CoreConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config = Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to load config: {}", path))?;

        debug!(
            "Loaded config from {} ({} preset controllers)",
            path,
            config.controllers.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: CoreConfig =
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.encoder.default_sensitivity == 0 {
            anyhow::bail!("encoder.default_sensitivity cannot be 0");
        }

        for (idx, preset) in self.controllers.iter().enumerate() {
            if classify(&preset.address).is_none() {
                anyhow::bail!(
                    "Controller {} address '{}' must end with /fader, /encoder or /button",
                    idx,
                    preset.address
                );
            }
            if preset.sensitivity == Some(0) {
                anyhow::bail!("Controller '{}' sensitivity cannot be 0", preset.address);
            }
        }

        Ok(())
    }

    /// Factory using the configured encoder defaults
    pub fn factory(&self) -> ControllerFactory {
        ControllerFactory::with_encoder_sensitivity(self.encoder.default_sensitivity)
    }

    /// Build a registry holding the preset controllers
    ///
    /// Presets are seeded through the unconditional path, so the first real
    /// message for each of them is always newer.
    pub fn build_registry(&self) -> Result<ControllerRegistry> {
        let factory = self.factory();
        let mut registry = ControllerRegistry::new(factory);

        for preset in &self.controllers {
            let mut controller = factory.try_create(
                &preset.address,
                preset.id,
                preset.mode,
                preset.value,
                0,
            )?;
            if let Some(sensitivity) = preset.sensitivity {
                controller.set_sensitivity(sensitivity);
            }
            registry.insert(controller);
        }

        Ok(registry)
    }
}

// Default value functions
fn default_sensitivity() -> i32 { DEFAULT_ENCODER_SENSITIVITY }
fn default_log_level() -> String { "info".to_string() }
