// Command implementations

pub mod add;
pub mod init;
pub mod list;
pub mod remove;
pub mod show;

use crate::config::{self, Endpoints};
use crate::manifest::Manifest;
use crate::pipeline;
use crate::registry::NpmRegistry;
use crate::session::Showcase;
use crate::ui;
use std::io;

pub(crate) fn load_manifest() -> anyhow::Result<Manifest> {
    Manifest::load().map_err(|e| match e.downcast_ref::<io::Error>() {
        Some(err) if err.kind() == io::ErrorKind::NotFound => {
            anyhow::anyhow!("Manifest not found. Run 'pkgfolio init' first.")
        }
        _ => e.context(format!("Failed to load {}", config::manifest_path())),
    })
}

/// Run the pipeline over the manifest's packages behind a spinner
pub(crate) async fn load_showcase(manifest: &Manifest) -> Showcase {
    let registry = NpmRegistry::new(Endpoints::resolve(manifest));
    let mut showcase = Showcase::new();

    let pb = ui::spinner(&format!("Fetching {} package(s)...", manifest.packages.len()));
    let aggregation = pipeline::aggregate(&registry, &manifest.packages).await;
    ui::clear_spinner(&pb);

    showcase.finish_loading(aggregation);
    showcase
}
