//! Configuration management for Stride CLI
//!
//! Stores API key, profiles, and default settings in ~/.config/stride/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const CONFIG_DIR: &str = "stride";
const CONFIG_FILE: &str = "config.toml";

/// Profile for a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Add a profile; the first one becomes the default
    pub fn add_profile(&mut self, name: String, user_id: Uuid, username: Option<String>) {
        if self.default_profile.is_none() {
            self.default_profile = Some(name.clone());
        }
        self.profiles.insert(name, Profile { user_id, username });
    }

    /// Remove a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> bool {
        let removed = self.profiles.remove(name).is_some();
        if removed && self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        removed
    }

    pub fn set_default_profile(&mut self, name: String) -> bool {
        if self.profiles.contains_key(&name) {
            self.default_profile = Some(name);
            true
        } else {
            false
        }
    }

    /// Get the active profile (specified or default)
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(profile_name)
    }

    pub fn get_user_id(&self, profile: Option<&str>) -> Option<Uuid> {
        self.get_profile(profile).map(|p| p.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_file_uses_defaults() {
        let config = Config::parse("api_key = \"abc\"\n").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url, default_base_url());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_parse_profiles() {
        let content = r#"
            base_url = "https://stride.example.com"
            default_profile = "mali"

            [profiles.mali]
            user_id = "6f1c2e9a-3b7d-4c5e-8f10-2a3b4c5d6e7f"
            username = "mali"
        "#;
        let config = Config::parse(content).unwrap();

        let user_id = config.get_user_id(None).unwrap();
        assert_eq!(user_id.to_string(), "6f1c2e9a-3b7d-4c5e-8f10-2a3b4c5d6e7f");
        assert_eq!(config.get_user_id(Some("nobody")), None);
    }

    #[test]
    fn test_rejects_malformed_user_id() {
        let content = "[profiles.bad]\nuser_id = \"not-a-uuid\"\n";
        assert!(Config::parse(content).is_err());
    }

    #[test]
    fn test_profile_lifecycle() {
        let mut config = Config::default();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        config.add_profile("a".into(), first, None);
        config.add_profile("b".into(), second, Some("bee".into()));
        assert_eq!(config.default_profile.as_deref(), Some("a"));
        assert_eq!(config.get_user_id(None), Some(first));

        assert!(config.set_default_profile("b".into()));
        assert!(!config.set_default_profile("c".into()));
        assert_eq!(config.get_user_id(None), Some(second));

        assert!(config.remove_profile("b"));
        assert!(config.default_profile.is_none());
        assert!(!config.remove_profile("b"));
    }

    #[test]
    fn test_save_format_round_trips() {
        let mut config = Config::default();
        config.set_api_key("secret".into());
        config.add_profile("mali".into(), Uuid::new_v4(), Some("mali".into()));

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.profiles, config.profiles);
        assert_eq!(parsed.default_profile, config.default_profile);
    }
}
