//! Configuration loading and root folder resolution
//!
//! The root folder holds all mutable application state (the SQLite
//! database). Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `MARQUEE_ROOT_FOLDER` environment variable
//! 3. TOML config file (`~/.config/marquee/config.toml`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the SQLite database file inside the root folder
pub const DATABASE_FILE_NAME: &str = "marquee.db";

/// TOML configuration file schema
///
/// All fields are optional; missing files or fields fall back to
/// defaults rather than terminating startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder override
    pub root_folder: Option<String>,
    /// TMDB API key (lowest-priority tier; database and ENV win)
    pub tmdb_api_key: Option<String>,
    /// Log level directive (e.g. "info", "marquee_web=debug")
    pub log_level: Option<String>,
}

/// Resolve the root folder from CLI arg, environment, TOML, or default
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("MARQUEE_ROOT_FOLDER") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    match load_toml_config() {
        Ok(config) => {
            if let Some(root_folder) = config.root_folder {
                return PathBuf::from(root_folder);
            }
        }
        Err(e) => {
            // Missing or malformed config is not fatal
            warn!("Config file unavailable ({}), using defaults", e);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("marquee"))
        .unwrap_or_else(|| PathBuf::from("./marquee_data"))
}

/// Path of the TOML configuration file for the platform
pub fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("marquee").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Load the TOML configuration file
///
/// Returns an error when the file is absent or unparsable; callers treat
/// both as "no overrides configured".
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    load_toml_config_from(&path)
}

/// Load a TOML configuration file from an explicit path
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Write the TOML configuration file, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Ensure the root folder exists and return the database path inside it
pub fn ensure_root_folder(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    Ok(root.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_var_wins_when_no_cli_arg() {
        std::env::set_var("MARQUEE_ROOT_FOLDER", "/tmp/marquee-env-root");
        let resolved = resolve_root_folder(None);
        std::env::remove_var("MARQUEE_ROOT_FOLDER");
        assert_eq!(resolved, PathBuf::from("/tmp/marquee-env-root"));
    }

    #[test]
    fn default_root_folder_is_nonempty() {
        let path = default_root_folder();
        assert!(!path.as_os_str().is_empty());
    }

    #[test]
    fn cli_arg_wins_over_everything() {
        let cli = PathBuf::from("/tmp/marquee-cli-root");
        let resolved = resolve_root_folder(Some(&cli));
        assert_eq!(resolved, cli);
    }

    #[test]
    fn toml_roundtrip_preserves_fields() {
        let dir = std::env::temp_dir().join(format!("marquee-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = TomlConfig {
            root_folder: Some("/srv/marquee".to_string()),
            tmdb_api_key: Some("abc123".to_string()),
            log_level: None,
        };
        write_toml_config(&config, &path).unwrap();

        let loaded = load_toml_config_from(&path).unwrap();
        assert_eq!(loaded.root_folder.as_deref(), Some("/srv/marquee"));
        assert_eq!(loaded.tmdb_api_key.as_deref(), Some("abc123"));
        assert!(loaded.log_level.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_toml_is_an_error_not_a_panic() {
        let result = load_toml_config_from(Path::new("/nonexistent/marquee/config.toml"));
        assert!(result.is_err());
    }
}
