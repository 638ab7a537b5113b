use mc_bridge_inventory::PipelineOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub mappings: MappingsSection,
    #[serde(default)]
    pub inventory: PipelineOptions,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MappingsSection {
    /// Bedrock protocol version reported as primary. Defaults to the newest
    /// version present in the item mappings.
    #[serde(default)]
    pub default_version: Option<u32>,
    /// Read mapping JSON from this directory instead of the embedded copy.
    #[serde(default)]
    pub directory: Option<String>,
    /// JSON list of extension items, registered after the core mappings.
    #[serde(default)]
    pub custom_items: Option<String>,
}

impl BridgeConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
