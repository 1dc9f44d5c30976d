// Aggregation pipeline: package identifiers in, ordered display records out

use crate::display::{self, DisplayRecord};
use crate::registry::{DownloadCount, PackageRegistry, RawMetadataDocument};
use futures::future::join_all;
use log::{debug, error, info};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// An identifier whose metadata could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPackage {
    pub id: String,
    pub reason: String,
}

/// Outcome of one pipeline run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// One record per successfully fetched identifier, in request order
    pub records: Vec<DisplayRecord>,
    /// Identifiers dropped from `records`, in request order
    pub failed: Vec<FailedPackage>,
}

/// A fetched document waiting to be mapped
struct Fetched<'a> {
    index: usize,
    id: &'a str,
    doc: RawMetadataDocument,
    downloads: DownloadCount,
}

/// Fetch and normalize every identifier.
///
/// All metadata fetches are issued at once and joined before anything is
/// mapped. Failed identifiers are left out of the records; a failing
/// downloads lookup only zeroes the count. Never fails as a whole.
pub async fn aggregate<R>(registry: &R, ids: &[String]) -> Aggregation
where
    R: PackageRegistry + ?Sized,
{
    aggregate_with(registry, ids, display::to_display_record).await
}

async fn aggregate_with<R, F>(registry: &R, ids: &[String], mapper: F) -> Aggregation
where
    R: PackageRegistry + ?Sized,
    F: Fn(&RawMetadataDocument, &str, DownloadCount, usize) -> DisplayRecord,
{
    if ids.is_empty() {
        debug!("No packages configured, skipping registry");
        return Aggregation::default();
    }

    info!("Fetching {} package(s)", ids.len());
    let results = join_all(ids.iter().map(|id| fetch_package(registry, id))).await;

    let mut fetched = Vec::with_capacity(ids.len());
    let mut failed = Vec::new();
    for (index, (id, result)) in ids.iter().zip(results).enumerate() {
        match result {
            Ok((doc, downloads)) => fetched.push(Fetched {
                index,
                id: id.as_str(),
                doc,
                downloads,
            }),
            Err(e) => {
                error!("Dropping package '{}': {}", id, e);
                failed.push(FailedPackage {
                    id: id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mapped = panic::catch_unwind(AssertUnwindSafe(|| {
        fetched
            .iter()
            .map(|f| mapper(&f.doc, f.id, f.downloads, f.index))
            .collect::<Vec<_>>()
    }));

    let records = match mapped {
        Ok(records) => records,
        Err(_) => {
            error!("Failed to build package records, showing none");
            Vec::new()
        }
    };

    info!(
        "Loaded {} package(s), {} failed",
        records.len(),
        failed.len()
    );
    Aggregation { records, failed }
}

/// Metadata first, then the best-effort downloads lookup under the package's name
async fn fetch_package<R>(
    registry: &R,
    id: &str,
) -> anyhow::Result<(RawMetadataDocument, DownloadCount)>
where
    R: PackageRegistry + ?Sized,
{
    let doc = registry.fetch_metadata(id).await?;
    let name = doc.name().unwrap_or(id).to_string();
    let downloads = registry.fetch_downloads(&name).await;
    Ok((doc, downloads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeRegistry {
        docs: HashMap<String, Value>,
        downloads: HashMap<String, u64>,
        metadata_calls: AtomicUsize,
        download_calls: AtomicUsize,
    }

    impl FakeRegistry {
        fn with_doc(mut self, id: &str, doc: Value) -> Self {
            self.docs.insert(id.to_string(), doc);
            self
        }

        fn with_downloads(mut self, name: &str, count: u64) -> Self {
            self.downloads.insert(name.to_string(), count);
            self
        }

        fn calls(&self) -> usize {
            self.metadata_calls.load(Ordering::SeqCst) + self.download_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PackageRegistry for FakeRegistry {
        async fn fetch_metadata(&self, id: &str) -> anyhow::Result<RawMetadataDocument> {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            match self.docs.get(id) {
                Some(doc) => Ok(serde_json::from_value(doc.clone())?),
                None => anyhow::bail!("Resource not found: {}", id),
            }
        }

        async fn fetch_downloads(&self, name: &str) -> DownloadCount {
            self.download_calls.fetch_add(1, Ordering::SeqCst);
            self.downloads
                .get(name)
                .map(|n| DownloadCount::Known(*n))
                .unwrap_or(DownloadCount::Unknown)
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn names(aggregation: &Aggregation) -> Vec<&str> {
        aggregation.records.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_list_makes_no_calls() {
        let registry = FakeRegistry::default();
        let result = aggregate(&registry, &[]).await;

        assert!(result.records.is_empty());
        assert!(result.failed.is_empty());
        assert_eq!(registry.calls(), 0);
    }

    #[tokio::test]
    async fn test_left_pad_scenario() {
        let registry = FakeRegistry::default()
            .with_doc(
                "left-pad",
                json!({
                    "name": "left-pad",
                    "dist-tags": {"latest": "1.3.0"},
                    "description": "String left pad"
                }),
            )
            .with_downloads("left-pad", 5_000_000);

        let result = aggregate(&registry, &ids(&["left-pad"])).await;

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.version, "1.3.0");
        assert_eq!(record.downloads, "5M");
        assert_eq!(record.install_command, "npm install left-pad");
    }

    #[tokio::test]
    async fn test_missing_package_is_dropped() {
        let registry = FakeRegistry::default();
        let result = aggregate(&registry, &ids(&["missing-pkg"])).await;

        assert!(result.records.is_empty());
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].id, "missing-pkg");
        // No downloads lookup without a document
        assert_eq!(registry.download_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_downloads_keep_record() {
        let registry = FakeRegistry::default().with_doc("quiet", json!({"name": "quiet"}));
        let result = aggregate(&registry, &ids(&["quiet"])).await;

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].downloads, "0");
        assert!(result.failed.is_empty());
    }

    #[tokio::test]
    async fn test_order_preserved_and_failures_isolated() {
        let registry = FakeRegistry::default()
            .with_doc("c", json!({"name": "c"}))
            .with_doc("a", json!({"name": "a"}))
            .with_doc("b", json!({"name": "b"}))
            .with_downloads("a", 1_200);

        let result = aggregate(&registry, &ids(&["c", "gone", "a", "b"])).await;

        assert_eq!(names(&result), vec!["c", "a", "b"]);
        assert_eq!(result.records[1].downloads, "1.2K");
        assert_eq!(result.failed, vec![FailedPackage {
            id: "gone".to_string(),
            reason: "Resource not found: gone".to_string(),
        }]);
    }

    #[tokio::test]
    async fn test_fallback_id_uses_request_position() {
        let registry = FakeRegistry::default()
            .with_doc("a", json!({"_id": "a", "name": "a"}))
            .with_doc("b", json!({"name": "b"}));

        let result = aggregate(&registry, &ids(&["gone", "a", "b"])).await;

        assert_eq!(result.records[0].id, "a");
        assert_eq!(result.records[1].id, "pkg-2");
    }

    #[tokio::test]
    async fn test_downloads_use_document_name() {
        let registry = FakeRegistry::default()
            .with_doc("alias", json!({"name": "real-name"}))
            .with_downloads("real-name", 42);

        let result = aggregate(&registry, &ids(&["alias"])).await;
        assert_eq!(result.records[0].downloads, "42");
    }

    #[tokio::test]
    async fn test_everything_failing_is_empty_not_error() {
        let registry = FakeRegistry::default();
        let result = aggregate(&registry, &ids(&["x", "y"])).await;

        assert!(result.records.is_empty());
        assert_eq!(result.failed.len(), 2);
    }

    #[tokio::test]
    async fn test_mapping_panic_degrades_to_empty() {
        let registry = FakeRegistry::default()
            .with_doc("a", json!({"name": "a"}))
            .with_doc("b", json!({"name": "b"}));

        let result = aggregate_with(&registry, &ids(&["a", "b"]), |doc, id, downloads, index| {
            if index == 1 {
                panic!("unexpected document shape");
            }
            display::to_display_record(doc, id, downloads, index)
        })
        .await;

        assert!(result.records.is_empty());
        assert!(result.failed.is_empty());
    }

    /// Registry whose metadata fetches only complete once all of them are in flight
    struct GatedRegistry {
        gate: tokio::sync::Barrier,
    }

    #[async_trait]
    impl PackageRegistry for GatedRegistry {
        async fn fetch_metadata(&self, id: &str) -> anyhow::Result<RawMetadataDocument> {
            self.gate.wait().await;
            Ok(serde_json::from_value(json!({"name": id}))?)
        }

        async fn fetch_downloads(&self, _name: &str) -> DownloadCount {
            DownloadCount::Known(1)
        }
    }

    #[tokio::test]
    async fn test_metadata_fetches_run_concurrently() {
        let registry = GatedRegistry {
            gate: tokio::sync::Barrier::new(3),
        };

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            aggregate(&registry, &ids(&["a", "b", "c"])),
        )
        .await
        .expect("fetches were not issued concurrently");

        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }
}
