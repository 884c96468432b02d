use crate::errors::{HugError, Result};
use crate::repo::{DEFAULT_COMMIT_MESSAGE, DEFAULT_USERNAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the wrapper and the `hg` processes it runs
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HugConfig {
    /// Mercurial executable, looked up on PATH when not absolute
    pub hg_binary: PathBuf,
    /// Message used when a commit is requested without one
    pub default_message: String,
    /// Author used when neither an override nor an engine identity exists
    pub fallback_username: String,
    /// Extra environment for every `hg` invocation
    pub env: BTreeMap<String, String>,
}

impl Default for HugConfig {
    fn default() -> Self {
        Self {
            hg_binary: PathBuf::from("hg"),
            default_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            fallback_username: DEFAULT_USERNAME.to_string(),
            env: BTreeMap::new(),
        }
    }
}

impl HugConfig {
    /// Load config from a YAML file, falling back to defaults when it is missing
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(HugConfig::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config: HugConfig = serde_yml::from_str(&content).map_err(|e| {
            HugError::ConfigError(format!(
                "Failed to parse config '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Load config from the user config directory (`<config_dir>/hug/config.yml`)
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(HugConfig::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hug").join("config.yml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = HugConfig::default();
        assert_eq!(config.hg_binary, PathBuf::from("hg"));
        assert_eq!(config.default_message, DEFAULT_COMMIT_MESSAGE);
        assert_eq!(config.fallback_username, DEFAULT_USERNAME);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = HugConfig::load(&temp_dir.path().join("config.yml")).unwrap();
        assert_eq!(config, HugConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yml");

        let yaml = r#"
hg_binary: /opt/mercurial/bin/hg
fallback_username: "Robot <robot@example.com>"
env:
  HGRCPATH: ""
"#;

        let mut file = fs::File::create(&config_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = HugConfig::load(&config_path).unwrap();
        assert_eq!(config.hg_binary, PathBuf::from("/opt/mercurial/bin/hg"));
        assert_eq!(config.fallback_username, "Robot <robot@example.com>");
        // Unset keys keep their defaults
        assert_eq!(config.default_message, DEFAULT_COMMIT_MESSAGE);
        assert_eq!(config.env.get("HGRCPATH"), Some(&String::new()));
    }

    #[test]
    fn test_load_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yml");
        fs::write(&config_path, "env: [not, a, map]\n").unwrap();

        let result = HugConfig::load(&config_path);
        assert!(matches!(result, Err(HugError::ConfigError(_))));
    }
}
