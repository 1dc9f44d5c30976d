// Add command for adding a package to the manifest

use crate::commands::load_manifest;
use crate::config::Endpoints;
use crate::registry::{NpmRegistry, PackageRegistry};
use crate::ui;
use log::{debug, info};

pub async fn add(name: String, no_verify: bool) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Package name cannot be empty");
    }

    let mut manifest = load_manifest()?;

    if manifest.contains(&name) {
        anyhow::bail!("Package '{}' is already in the portfolio", name);
    }

    if !no_verify {
        let registry = NpmRegistry::new(Endpoints::resolve(&manifest));
        let doc = registry
            .fetch_metadata(&name)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to resolve package '{}': {}", name, e))?;
        debug!(
            "Resolved '{}' at version {}",
            name,
            doc.latest_version().unwrap_or("unknown")
        );
    }

    manifest.add_package(&name);
    manifest.save()?;
    info!("Added package '{}'", name);
    ui::success(&format!("Added package '{}'", name));
    Ok(())
}
