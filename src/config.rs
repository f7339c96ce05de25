//! Configuration for Novation GW
//!
//! Handles loading, parsing and validation of the YAML configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::color::ColorScheme;
use crate::midi::PortRole;
use crate::profile::DeviceModel;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_device")]
    pub device: DeviceModel,
    #[serde(default)]
    pub session: SessionConfig,
    /// MIDI client name announced to the OS
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

/// Options fixed for the lifetime of one session
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub port_name_overrides: PortOverrides,
    /// Replaces the device profile's color table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
    /// Omit repeated status bytes on outbound channel messages
    pub use_running_status: bool,
}

/// Explicit endpoint names, for drivers that rename ports
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub musical: Option<PortOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<PortOverride>,
}

impl PortOverrides {
    pub fn get(&self, role: PortRole) -> Option<&PortOverride> {
        match role {
            PortRole::Musical => self.musical.as_ref(),
            PortRole::Control => self.control.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

fn default_device() -> DeviceModel {
    DeviceModel::LaunchkeyMiniMk2
}

fn default_client_name() -> String {
    "Novation-GW".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            session: SessionConfig::default(),
            client_name: default_client_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML config: {}", path))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            anyhow::bail!("client_name cannot be empty");
        }

        for role in PortRole::ALL {
            let Some(names) = self.session.port_name_overrides.get(role) else {
                continue;
            };
            for (direction, name) in [("input", &names.input), ("output", &names.output)] {
                if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                    anyhow::bail!("{} {} port override cannot be empty", role, direction);
                }
            }
        }

        if let Some(scheme) = &self.session.color_scheme {
            scheme.validate().context("Invalid color_scheme")?;
        }

        Ok(())
    }
}
