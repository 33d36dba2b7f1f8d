//! Persisted application settings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use marketplace_core::{ContactInfo, Latency};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "marketplace";

/// Application settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Delay catalog and chat calls like a real network would.
    pub simulate_latency: bool,
    /// Wishlist database file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Contact details pre-filled in the sell form.
    pub default_contact: Option<ContactInfo>,
    /// Currency symbol for newly posted listings.
    pub currency: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            database_path: None,
            default_contact: None,
            currency: "₹".to_string(),
        }
    }
}

impl AppSettings {
    /// Latency profile selected by these settings.
    #[must_use]
    pub const fn latency(&self) -> Latency {
        Latency::simulated(self.simulate_latency)
    }

    /// Wishlist database file, falling back to the platform data directory.
    #[must_use]
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("marketplace.db")
        })
    }
}

/// Default settings file location.
#[must_use]
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("settings.json")
}

/// Load settings from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_settings_from(path: &Path) -> anyhow::Result<AppSettings> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("invalid settings in {}", path.display()))
}

/// Save settings to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_settings_to(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("Settings saved to {:?}", path);
    Ok(())
}

/// Load settings from the default location.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn load_settings() -> anyhow::Result<AppSettings> {
    load_settings_from(&settings_path()).await
}

/// Save settings to the default location.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_settings(settings: &AppSettings) -> anyhow::Result<()> {
    save_settings_to(&settings_path(), settings).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json")).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(settings.simulate_latency);
        assert_eq!(settings.currency, "₹");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            simulate_latency: false,
            database_path: Some(dir.path().join("db.sqlite")),
            default_contact: Some(ContactInfo::new("Asha", "9876543210", "")),
            currency: "$".to_string(),
        };

        save_settings_to(&path, &settings).await.unwrap();
        assert_eq!(load_settings_from(&path).await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, r#"{"currency": "€"}"#).await.unwrap();

        let settings = load_settings_from(&path).await.unwrap();
        assert_eq!(settings.currency, "€");
        assert!(settings.simulate_latency);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        assert!(load_settings_from(&path).await.is_err());
    }

    #[test]
    fn test_latency_follows_flag() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.latency(), Latency::realistic());
        settings.simulate_latency = false;
        assert_eq!(settings.latency(), Latency::none());
    }
}
