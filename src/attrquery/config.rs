use crate::error::{AttrError, Result};
use crate::registry::AttrRegistry;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for attrquery, stored in .attrquery/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttrqueryConfig {
    /// Value files loaded into the registry on startup, relative to the config dir
    #[serde(default)]
    pub values_files: Vec<String>,

    /// Register the values shipped for the built-in kinds
    #[serde(default = "default_preload_builtins")]
    pub preload_builtins: bool,
}

fn default_preload_builtins() -> bool {
    true
}

impl Default for AttrqueryConfig {
    fn default() -> Self {
        Self {
            values_files: Vec::new(),
            preload_builtins: default_preload_builtins(),
        }
    }
}

impl AttrqueryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AttrError::Io)?;
        let config: AttrqueryConfig =
            serde_json::from_str(&content).map_err(AttrError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AttrError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AttrError::Serialization)?;
        fs::write(config_path, content).map_err(AttrError::Io)?;
        Ok(())
    }

    /// Value file paths, with relative entries resolved against `config_dir`
    pub fn values_paths<P: AsRef<Path>>(&self, config_dir: P) -> Vec<PathBuf> {
        self.values_files
            .iter()
            .map(|file| config_dir.as_ref().join(file))
            .collect()
    }

    /// Builds the registry this config describes.
    ///
    /// Built-in values go in first, so a value file can only append to them.
    pub fn build_registry<P: AsRef<Path>>(&self, config_dir: P) -> Result<AttrRegistry> {
        let registry = if self.preload_builtins {
            AttrRegistry::with_builtin_values()?
        } else {
            AttrRegistry::new()
        };

        for path in self.values_paths(config_dir) {
            registry.load_values_file(&path)?;
        }
        debug!("Registry ready with {} kind(s)", registry.kinds().len());
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Instrument, Source};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AttrqueryConfig::default();
        assert!(config.values_files.is_empty());
        assert!(config.preload_builtins);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = AttrqueryConfig::load(dir.path()).unwrap();
        assert_eq!(config, AttrqueryConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".attrquery");

        let config = AttrqueryConfig {
            values_files: vec!["extra.json".to_string()],
            preload_builtins: false,
        };
        config.save(&config_dir).unwrap();

        let loaded = AttrqueryConfig::load(&config_dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AttrqueryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AttrqueryConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        assert!(matches!(
            AttrqueryConfig::load(dir.path()),
            Err(AttrError::Serialization(_))
        ));
    }

    #[test]
    fn test_values_paths_are_relative_to_config_dir() {
        let config = AttrqueryConfig {
            values_files: vec!["a.json".to_string()],
            preload_builtins: true,
        };
        assert_eq!(
            config.values_paths("/etc/attrquery"),
            vec![PathBuf::from("/etc/attrquery/a.json")]
        );
    }

    #[test]
    fn test_build_registry_without_builtins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("extra.json"),
            r#"{"Instrument": [["AIA", "Atmospheric Imaging Assembly"]]}"#,
        )
        .unwrap();
        let config = AttrqueryConfig {
            values_files: vec!["extra.json".to_string()],
            preload_builtins: false,
        };

        let registry = config.build_registry(dir.path()).unwrap();
        assert_eq!(registry.accessor_names::<Instrument>(), vec!["aia"]);
        assert!(registry.lookup::<Source>().is_none());
    }

    #[test]
    fn test_build_registry_with_builtins() {
        let dir = TempDir::new().unwrap();
        let registry = AttrqueryConfig::default()
            .build_registry(dir.path())
            .unwrap();
        assert!(registry.lookup::<Source>().is_some());
    }

    #[test]
    fn test_build_registry_missing_values_file() {
        let dir = TempDir::new().unwrap();
        let config = AttrqueryConfig {
            values_files: vec!["nope.json".to_string()],
            preload_builtins: false,
        };
        assert!(matches!(
            config.build_registry(dir.path()),
            Err(AttrError::Io(_))
        ));
    }
}
