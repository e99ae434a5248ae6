//! Unified path management for agora configuration files.
//!
//! Paths follow the platform conventions reported by the `dirs` crate
//! (XDG on Linux, `Application Support` on macOS, `AppData` on Windows).

use std::path::PathBuf;

const APP_DIR_NAME: &str = "agora";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for agora.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/agora/             # Config directory
/// └── config.toml              # Store, directory and logging settings
///
/// ~/.local/share/agora/        # Data directory
/// └── seed.json                # Default seed file location
/// ```
pub struct AgoraPaths;

impl AgoraPaths {
    /// Returns the agora configuration directory (e.g. `~/.config/agora/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the agora data directory (e.g. `~/.local/share/agora/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default seed file location, used when the config names none.
    pub fn default_seed_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("seed.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = AgoraPaths::config_file().unwrap();
        assert!(config_file.ends_with("agora/config.toml"));
        // Verify it's under config_dir
        let config_dir = AgoraPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_default_seed_file() {
        let seed = AgoraPaths::default_seed_file().unwrap();
        assert!(seed.ends_with("seed.json"));
        assert!(seed.starts_with(AgoraPaths::data_dir().unwrap()));
    }
}
