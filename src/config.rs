//! Platform-specific paths and settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the data directory (useful for tests)
const DATA_DIR_ENV: &str = "MOVILOG_DATA_DIR";

/// Environment variable holding the TMDB API read access token
const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Get the movilog data directory
/// - macOS: ~/Library/Application Support/movilog/
/// - Linux: ~/.local/share/movilog/
/// - Windows: %APPDATA%/movilog/
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("movilog"))
}

/// Get the path to the SQLite database file, creating the parent directory
pub fn database_path() -> Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir.join("movies.db"))
}

/// Get the movilog config directory
pub fn config_dir() -> Result<PathBuf> {
    let config = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config.join("movilog"))
}

/// Get the path to the settings file (config.json)
pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Settings stored in config.json
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// TMDB API read access token
    pub token: Option<String>,
}

impl Settings {
    /// Read settings from config.json, or defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = settings_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))
    }
}

/// Resolve the TMDB API token: TMDB_API_TOKEN env var first, then config.json
pub fn api_token() -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            return Ok(token);
        }
    }

    if let Some(token) = Settings::load()?.token {
        if !token.trim().is_empty() {
            return Ok(token);
        }
    }

    anyhow::bail!(
        "No TMDB API token configured. Set the {} environment variable or add \
         {{\"token\": \"...\"}} to {}",
        TOKEN_ENV,
        settings_path()?.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_paths_exist() {
        // These should not panic
        let _ = data_dir();
        let _ = config_dir();
        let _ = settings_path();
    }

    #[test]
    fn test_settings_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "token": "abc123" }}"#).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let settings: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(settings.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_settings_empty_object() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.token.is_none());
    }
}
