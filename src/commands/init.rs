// Init command for initializing a new portfolio manifest

use crate::constants;
use crate::manifest::Manifest;
use crate::ui;

pub fn init() -> anyhow::Result<()> {
    // Never overwrite an existing manifest, even one that fails to parse
    if Manifest::exists() {
        ui::dim("Manifest detected. Skipping initialization.");
        return Ok(());
    }

    Manifest::default().save()?;
    ui::success(&format!("Initialized {}", constants::MANIFEST_FILE));
    Ok(())
}
