// Manifest module for the portfolio's package list

use crate::config;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Package identifiers in display order
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistrySettings>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegistrySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads_url: Option<String>,
}

impl Manifest {
    /// Whether a manifest file is present, parseable or not
    pub fn exists() -> bool {
        Path::new(&config::manifest_path()).exists()
    }

    pub fn load() -> anyhow::Result<Self> {
        let path = config::manifest_path();
        let text = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = config::config_dir();
        std::fs::create_dir_all(&dir)?;
        let path = config::manifest_path();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(&path, text)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }

    /// Append a package, keeping insertion order. Returns false for duplicates.
    pub fn add_package(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.packages.push(name.to_string());
        true
    }

    /// Remove a package. Returns false if it was not listed.
    pub fn remove_package(&mut self, name: &str) -> bool {
        let before = self.packages.len();
        self.packages.retain(|p| p != name);
        self.packages.len() != before
    }
}
