//! Settings file.
//!
//! The only setting is the default key path used when `encrypt` / `decrypt`
//! are run without `--key`. Settings are loaded once in `main` and passed to
//! commands as a value.
//!
//! ```toml
//! default_key = "/home/me/keys/key_256.crypt.key"
//! ```
//!
//! `ANUCRYPT_DEFAULT_KEY` overrides the file value.

use crate::error::{CryptError, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.toml";
const APP_DIR: &str = "anucrypt";
const FALLBACK_FILE: &str = "anucrypt.toml";
pub const ENV_DEFAULT_KEY: &str = "ANUCRYPT_DEFAULT_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key: Option<PathBuf>,
}

impl Settings {
    /// Platform config dir (`~/.config/anucrypt/settings.toml` on Linux),
    /// or `./anucrypt.toml` if there is none
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_FILE))
    }

    /// Load settings from `path`. A missing file gives defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = if path.exists() {
            let path_str = path
                .to_str()
                .ok_or_else(|| CryptError::Config("Invalid config path".into()))?;
            Config::builder()
                .add_source(File::new(path_str, FileFormat::Toml))
                .build()
                .and_then(|cfg| cfg.try_deserialize::<Settings>())
                .map_err(|err| CryptError::Config(format!("Failed to load config file: {err}")))?
        } else {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            Settings::default()
        };

        if let Some(key) = env::var_os(ENV_DEFAULT_KEY).filter(|v| !v.is_empty()) {
            settings.default_key = Some(PathBuf::from(key));
        }

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(self)
            .map_err(|err| CryptError::Config(format!("Failed to serialize settings: {err}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The key to use: the explicit one if given, else the configured default
    pub fn resolve_key_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.default_key.clone())
            .ok_or_else(|| {
                CryptError::InvalidArgument(
                    "no key given and no default key configured (see `default-key`)".into(),
                )
            })
    }
}
