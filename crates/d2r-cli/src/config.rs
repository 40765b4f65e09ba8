//! Configuration file management for d2r.
//!
//! Provides a TOML-based config file at `~/.config/d2r/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.
//!
//! Authentication is an external collaborator; the `[user]` section is the
//! CLI's stand-in for it. Commands run without a user when neither the
//! `--user` flag nor the config file supplies one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use d2r_db::config::DbConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSection {
    /// Identity used for saved offices and plan progress.
    pub id: Uuid,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the d2r config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/d2r` or `~/.config/d2r`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("d2r");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("d2r")
}

/// Return the path to the d2r config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolution
// -----------------------------------------------------------------------

/// Fully resolved runtime configuration.
#[derive(Debug)]
pub struct D2rConfig {
    pub db_config: DbConfig,
    /// User identity from the config file, used when `--user` is absent.
    pub default_user: Option<Uuid>,
}

impl D2rConfig {
    /// Resolve configuration with the chain:
    /// CLI flag > `D2R_DATABASE_URL` > config file > default URL.
    ///
    /// A missing config file is not an error; everything has a fallback.
    pub fn resolve(cli_db_url: Option<&str>) -> Result<Self> {
        let file = load_config().ok();

        let db_url = if let Some(url) = cli_db_url {
            url.to_owned()
        } else if let Ok(url) = std::env::var("D2R_DATABASE_URL") {
            url
        } else if let Some(f) = &file {
            f.database.url.clone()
        } else {
            DbConfig::DEFAULT_URL.to_owned()
        };

        let default_user = file.and_then(|f| f.user).map(|u| u.id);

        Ok(Self {
            db_config: DbConfig::new(db_url),
            default_user,
        })
    }

    /// Pick the acting user: explicit flag first, then the config file.
    pub fn user(&self, flag: Option<Uuid>) -> Option<Uuid> {
        flag.or(self.default_user)
    }
}
