//! Configuration file support for manifest-sbom.
//!
//! Provides YAML-based configuration through `manifest-sbom.config.yml` files.
//! The file carries action inputs under an `inputs:` map; they form the
//! lowest-precedence input layer below the command line and `INPUT_*` variables.

use anyhow::Context;
use serde::Deserialize;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::adapters::inbound::MapInputs;
use crate::sbom_action::policies::input_aliases::is_known_key;
use crate::shared::error::ActionError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "manifest-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, Value>,
}

impl ConfigFile {
    /// Converts the `inputs:` map into an input layer
    ///
    /// Strings, booleans and numbers become strings; `null` leaves the key unset.
    pub fn to_inputs(&self) -> Result<MapInputs> {
        let mut pairs = Vec::with_capacity(self.inputs.len());
        for (key, value) in &self.inputs {
            if let Some(text) = scalar_to_string(key, value)? {
                pairs.push((key.clone(), text));
            }
        }
        Ok(MapInputs::new("config file", pairs))
    }

    /// Warnings for fields and input keys that will be ignored
    pub fn warnings(&self) -> Vec<String> {
        let fields = self
            .unknown_fields
            .keys()
            .map(|key| format!("Unknown config field '{}' will be ignored.", key));
        let inputs = self
            .inputs
            .keys()
            .filter(|key| !is_known_key(key))
            .map(|key| format!("Unknown input '{}' in config file will be ignored.", key));
        fields.chain(inputs).collect()
    }
}

fn scalar_to_string(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ActionError::Configuration {
            details: format!(
                "config input '{}' must be a string, boolean or number",
                key
            ),
        }
        .into()),
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document deserializes as null
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).map_err(|e| {
        ActionError::Configuration {
            details: format!(
                "Failed to parse config file: {}: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display(),
                e
            ),
        }
    })?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}
