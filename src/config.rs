// Config module for shared configuration utilities

use crate::constants;
use crate::manifest::Manifest;

pub fn config_dir() -> String {
    std::env::var("PKGFOLIO_DIR").unwrap_or_else(|_| ".".to_string())
}

pub fn manifest_path() -> String {
    let dir = config_dir();
    if dir == "." {
        constants::MANIFEST_FILE.to_string()
    } else {
        format!("{}/{}", dir, constants::MANIFEST_FILE)
    }
}

/// Endpoint bases used by the registry client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub registry_url: String,
    pub downloads_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            registry_url: constants::DEFAULT_REGISTRY_URL.to_string(),
            downloads_url: constants::DEFAULT_DOWNLOADS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Resolve endpoints: environment wins over the manifest, manifest over defaults
    pub fn resolve(manifest: &Manifest) -> Self {
        Self::layered(
            manifest,
            std::env::var("PKGFOLIO_REGISTRY_URL").ok(),
            std::env::var("PKGFOLIO_DOWNLOADS_URL").ok(),
        )
    }

    fn layered(
        manifest: &Manifest,
        registry_env: Option<String>,
        downloads_env: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        let settings = manifest.registry.as_ref();

        let registry_url = registry_env
            .or_else(|| settings.and_then(|r| r.url.clone()))
            .unwrap_or(defaults.registry_url);
        let downloads_url = downloads_env
            .or_else(|| settings.and_then(|r| r.downloads_url.clone()))
            .unwrap_or(defaults.downloads_url);

        Self {
            registry_url: registry_url.trim_end_matches('/').to_string(),
            downloads_url: downloads_url.trim_end_matches('/').to_string(),
        }
    }
}
