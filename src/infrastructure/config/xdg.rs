//! TOML config file under the user's config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "oral-eval";
const FILE_NAME: &str = "config.toml";
const HEADER: &str = "# oral-eval configuration\n# Environment variables and command-line flags override these values.\n\n";

/// Config store at `$XDG_CONFIG_HOME/oral-eval/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_default();
        Self::with_path(base.join(APP_DIR).join(FILE_NAME))
    }

    /// Store backed by an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn ensure_parent(path: &Path) -> Result<(), ConfigError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .await
            .map_err(|e| ConfigError::WriteError(format!("{}: {}", dir.display(), e))),
        _ => Ok(()),
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.location(), "no config file, using defaults");
                return Ok(AppConfig::empty());
            }
            Err(e) => return Err(ConfigError::ReadError(format!("{}: {}", self.location(), e))),
        };
        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", self.location(), e)))
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let body =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        ensure_parent(&self.path).await?;
        fs::write(&self.path, format!("{HEADER}{body}"))
            .await
            .map_err(|e| ConfigError::WriteError(format!("{}: {}", self.location(), e)))?;
        debug!(path = %self.location(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.location()));
        }
        self.save(&AppConfig::defaults()).await
    }
}
