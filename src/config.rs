use crate::error::Result;
use crate::infrastructure::mock_gateway::MockBehavior;
use serde::Deserialize;
use std::path::Path;

/// Gateway fleet declaration loaded from a TOML file:
///
/// ```toml
/// [[gateway]]
/// name = "stripe"
/// behavior = "success"
///
/// [[gateway]]
/// name = "flaky"
/// behavior = "fault"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GatewaysConfig {
    #[serde(default)]
    pub gateway: Vec<GatewayEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayEntry {
    pub name: String,
    #[serde(default)]
    pub behavior: MockBehavior,
}

impl GatewaysConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Single always-successful `mock` gateway, used when no file is given.
    pub fn default_fleet() -> Self {
        Self {
            gateway: vec![GatewayEntry {
                name: "mock".to_string(),
                behavior: MockBehavior::Success,
            }],
        }
    }
}
