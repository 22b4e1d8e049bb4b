//! Logger configuration.
//!
//! Loaded from YAML, e.g.
//!
//! ```yaml
//! prefix: vic-machine
//! initial_capacity: 65536
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default prefix of uploaded log file names.
pub const DEFAULT_PREFIX: &str = "vic-machine";

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix of the uploaded log file name.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Initial capacity of the pipe buffer in bytes (a hint, the pipe grows as needed).
    #[serde(default)]
    pub initial_capacity: usize,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            initial_capacity: 0,
        }
    }
}

impl Config {
    /// Parses a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(s: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(s)?;
        if config.prefix.is_empty() {
            config.prefix = default_prefix();
        }
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.prefix, "vic-machine");
        assert_eq!(config.initial_capacity, 0);
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());

        let config = Config::from_yaml("prefix: \"\"").unwrap();
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn test_from_yaml_overrides() {
        let config = Config::from_yaml("prefix: vch-upgrade\ninitial_capacity: 4096\n").unwrap();
        assert_eq!(config.prefix, "vch-upgrade");
        assert_eq!(config.initial_capacity, 4096);
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(Config::from_yaml("initial_capacity: lots").is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config {
            prefix: "custom".to_string(),
            initial_capacity: 128,
        };
        let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
