use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the site configuration file, looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "quillpress.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Site-wide settings for assembling posts into a published site.
#[derive(Debug, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    /// Base path prefixed onto every post's permalink and URL at assembly.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Directory holding post sources, relative to the site root unless
    /// absolute.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("posts")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            subtitle: String::new(),
            author: String::new(),
            base_path: default_base_path(),
            content_dir: default_content_dir(),
        }
    }
}

impl SiteConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: SiteConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured content dir
        config.content_dir = Self::expand_path(&config.content_dir).unwrap_or(config.content_dir);

        Ok(Some(config))
    }

    /// Loads `quillpress.toml` from a site root directory.
    pub fn load_from_dir<P: AsRef<Path>>(site_root: P) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(site_root.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let dir = TempDir::new().unwrap();
        let original = SiteConfig {
            title: "Test Site".to_string(),
            subtitle: "testing".to_string(),
            author: "jan".to_string(),
            base_path: "/blog".to_string(),
            content_dir: PathBuf::from("/tmp/test-posts"),
        };

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        original.save_to_path(&config_path).unwrap();
        let loaded = SiteConfig::load_from_path(&config_path).unwrap().unwrap();

        assert_eq!(loaded.title, original.title);
        assert_eq!(loaded.base_path, original.base_path);
        assert_eq!(loaded.content_dir, original.content_dir);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "title = \"Minimal\"\n").unwrap();

        let loaded = SiteConfig::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded.title, "Minimal");
        assert_eq!(loaded.base_path, "/");
        assert_eq!(loaded.content_dir, PathBuf::from("posts"));
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "title = [not toml").unwrap();

        let err = SiteConfig::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = SiteConfig::expand_path(Path::new("~/posts")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("posts"));
    }
}
