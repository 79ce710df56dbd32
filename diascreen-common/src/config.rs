//! Configuration loading and root folder resolution
//!
//! The root folder holds everything the service owns on disk: the SQLite
//! database and the model artifact. Resolution follows a fixed priority
//! order so deployments can override the default without editing code.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_ENV_VAR: &str = "DIASCREEN_ROOT";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Database file location under the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("diascreen.db")
}

/// Model artifact location under the root folder.
///
/// Fixed relative to the root; the artifact path is not configurable at
/// runtime.
pub fn model_path(root: &Path) -> PathBuf {
    root.join("model").join("classifier.onnx")
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Get default configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/diascreen/config.toml first, then /etc/diascreen/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("diascreen").join("config.toml"));
        let system_config = PathBuf::from("/etc/diascreen/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let config_path = dirs::config_dir()
            .map(|d| d.join("diascreen").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        if config_path.exists() {
            Ok(config_path)
        } else {
            Err(Error::Config(format!(
                "Config file not found: {:?}",
                config_path
            )))
        }
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("diascreen"))
        .unwrap_or_else(|| PathBuf::from("./diascreen_data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_argument_wins() {
        let root = resolve_root_folder(Some("/srv/diascreen"));
        assert_eq!(root, PathBuf::from("/srv/diascreen"));
    }

    #[test]
    #[serial]
    fn test_env_var_used_when_no_cli_arg() {
        std::env::set_var(ROOT_ENV_VAR, "/tmp/diascreen-env-root");
        let root = resolve_root_folder(None);
        std::env::remove_var(ROOT_ENV_VAR);
        assert_eq!(root, PathBuf::from("/tmp/diascreen-env-root"));
    }

    #[test]
    #[serial]
    fn test_cli_argument_beats_env_var() {
        std::env::set_var(ROOT_ENV_VAR, "/tmp/diascreen-env-root");
        let root = resolve_root_folder(Some("/srv/diascreen"));
        std::env::remove_var(ROOT_ENV_VAR);
        assert_eq!(root, PathBuf::from("/srv/diascreen"));
    }

    #[test]
    fn test_derived_paths() {
        let root = PathBuf::from("/srv/diascreen");
        assert_eq!(database_path(&root), PathBuf::from("/srv/diascreen/diascreen.db"));
        assert_eq!(
            model_path(&root),
            PathBuf::from("/srv/diascreen/model/classifier.onnx")
        );
    }
}
