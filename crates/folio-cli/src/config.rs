use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration, stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL all relative content paths resolve against.
    pub site_root: String,

    /// Posts shown per feed page when no `maxItems` override is given.
    pub posts_per_page: usize,

    /// Session file location. Defaults to `session.json` next to the
    /// config file.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_root: "https://www.piskolab.com".to_string(),
            posts_per_page: 5,
            session_file: None,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolves the config file path, in priority order: the explicit
    /// path, the `FOLIO_CONFIG` environment variable, then the platform
    /// config directory.
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(PathBuf::from(path));
        }

        if let Ok(env_path) = std::env::var("FOLIO_CONFIG") {
            return Ok(PathBuf::from(env_path));
        }

        let dir = dirs::config_dir().context("could not determine the config directory")?;
        Ok(dir.join("folio").join("config.toml"))
    }

    /// Where the session record lives for this configuration.
    pub fn session_path(&self, config_path: &Path) -> PathBuf {
        match &self.session_file {
            Some(path) => path.clone(),
            None => config_path.with_file_name("session.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.posts_per_page, 5);
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let config = Config {
            site_root: "http://localhost:8080".to_string(),
            posts_per_page: 3,
            session_file: Some(PathBuf::from("/tmp/folio-session.json")),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.site_root, "http://localhost:8080");
        assert_eq!(loaded.posts_per_page, 3);
    }

    #[test]
    fn test_session_path_defaults_next_to_config() {
        let config = Config::default();
        let path = config.session_path(Path::new("/home/me/.config/folio/config.toml"));
        assert_eq!(
            path,
            PathBuf::from("/home/me/.config/folio/session.json")
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "posts_per_page = \"many\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
