use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::utils::ConfigError;

/// Deserialize a config file, picking the format from its extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            let text = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&text)?)
        }
        Some("json") => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}
