// List command: aggregate the portfolio and print matching cards

use crate::commands::{load_manifest, load_showcase};
use crate::display::DisplayRecord;
use crate::pipeline::FailedPackage;
use crate::ui;
use serde::Serialize;

#[derive(Serialize)]
struct ListOutput<'a> {
    query: &'a str,
    /// Loaded before filtering
    total: usize,
    packages: Vec<DisplayRecord>,
    failed: &'a [FailedPackage],
}

pub async fn list(query: Option<String>, json: bool) -> anyhow::Result<()> {
    let manifest = load_manifest()?;
    let mut showcase = load_showcase(&manifest).await;
    showcase.set_query(query.unwrap_or_default());

    if json {
        return ui::json(&ListOutput {
            query: showcase.query(),
            total: showcase.records().len(),
            packages: showcase.visible(),
            failed: showcase.failed(),
        });
    }

    for failed in showcase.failed() {
        ui::warning(&format!("Could not load '{}': {}", failed.id, failed.reason));
    }

    if let Some(notice) = showcase.empty_notice() {
        ui::dim(&notice);
        return Ok(());
    }

    for record in showcase.visible() {
        ui::card(&record);
    }
    Ok(())
}
