// Show command: detail view for one selected package

use crate::commands::{load_manifest, load_showcase};
use crate::detail::DetailView;
use crate::ui;

pub async fn show(name: String, readme: bool, json: bool) -> anyhow::Result<()> {
    let manifest = load_manifest()?;
    let mut showcase = load_showcase(&manifest).await;
    showcase.select(&name);

    let Some(record) = showcase.selected() else {
        anyhow::bail!("Package '{}' not found in portfolio", name);
    };
    let view = DetailView::from_record(record);

    if json {
        ui::json(&view)?;
    } else {
        ui::detail(&view, readme);
    }

    showcase.deselect();
    Ok(())
}
