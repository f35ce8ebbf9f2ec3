use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// User-level configuration, loaded from `<home>/config.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file location.  Relative paths are resolved against the
    /// PassVault home directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Minimum length of a new master password.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Show secret values in tables without `--show-secrets`.
    #[serde(default)]
    pub show_secrets: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.pvlt".to_string()
}

fn default_min_password_len() -> usize {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            min_password_len: default_min_password_len(),
            show_secrets: false,
        }
    }
}

impl Settings {
    /// Name of the config file inside the home directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Name of the home directory under the user's home.
    const HOME_DIR_NAME: &'static str = ".passvault";

    /// Load settings from `<home>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.min_password_len == 0 {
            return Err(VaultError::ConfigError(format!(
                "{}: min_password_len must be at least 1",
                config_path.display()
            )));
        }

        Ok(settings)
    }

    /// The default home directory: `~/.passvault`.
    ///
    /// Falls back to `./.passvault` when the user's home can't be found.
    pub fn default_home() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::HOME_DIR_NAME)
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `~/.passvault/vault.pvlt`
    pub fn vault_path(&self, home: &Path) -> PathBuf {
        let file = Path::new(&self.vault_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            home.join(file)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
