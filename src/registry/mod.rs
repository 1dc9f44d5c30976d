// Registry module: the I/O boundary towards the package registry and its stats API

pub mod document;
pub mod http;

use crate::config::Endpoints;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

pub use document::{Maintainer, RawMetadataDocument};

/// Trailing 30-day download count for one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadCount {
    Known(u64),
    /// The stats lookup failed; rendered as zero
    Unknown,
}

impl DownloadCount {
    pub fn value(self) -> u64 {
        match self {
            DownloadCount::Known(n) => n,
            DownloadCount::Unknown => 0,
        }
    }
}

/// Trait for package registries the portfolio can aggregate from
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetch the full metadata document for a package.
    ///
    /// Transport, status and decoding failures are returned to the caller;
    /// there is no retry.
    async fn fetch_metadata(&self, id: &str) -> Result<RawMetadataDocument>;

    /// Fetch last month's download count. Best-effort: never fails, any
    /// problem yields `DownloadCount::Unknown`.
    async fn fetch_downloads(&self, name: &str) -> DownloadCount;
}

#[derive(Debug, Deserialize)]
struct DownloadsPoint {
    downloads: Option<u64>,
}

/// The public npm registry (or any mirror speaking the same API)
pub struct NpmRegistry {
    endpoints: Endpoints,
}

impl NpmRegistry {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn metadata_url(&self, id: &str) -> String {
        // Scoped names carry a '/', which must not split the path
        format!(
            "{}/{}",
            self.endpoints.registry_url,
            urlencoding::encode(id)
        )
    }

    pub fn downloads_url(&self, name: &str) -> String {
        format!(
            "{}/downloads/point/last-month/{}",
            self.endpoints.downloads_url, name
        )
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn fetch_metadata(&self, id: &str) -> Result<RawMetadataDocument> {
        let url = self.metadata_url(id);
        http::fetch_json(&url).await
    }

    async fn fetch_downloads(&self, name: &str) -> DownloadCount {
        let url = self.downloads_url(name);
        match http::fetch_json::<DownloadsPoint>(&url).await {
            Ok(DownloadsPoint {
                downloads: Some(n),
            }) => {
                debug!("{} downloads last month: {}", name, n);
                DownloadCount::Known(n)
            }
            Ok(DownloadsPoint { downloads: None }) => {
                warn!("Download stats for {} carry no count", name);
                DownloadCount::Unknown
            }
            Err(e) => {
                warn!("Could not fetch downloads for {}: {}", name, e);
                DownloadCount::Unknown
            }
        }
    }
}
