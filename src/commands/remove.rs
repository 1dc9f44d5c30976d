// Remove command for removing a package from the manifest

use crate::commands::load_manifest;
use crate::ui;

pub fn remove(name: String) -> anyhow::Result<()> {
    let mut manifest = load_manifest()?;

    if !manifest.remove_package(&name) {
        anyhow::bail!("Package '{}' not found in manifest", name);
    }

    manifest.save()?;
    ui::success(&format!("Removed package '{}'", name));
    Ok(())
}
