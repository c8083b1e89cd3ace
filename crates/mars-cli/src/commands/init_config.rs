use anyhow::{bail, Result};

use mars_core::AppConfig;

pub fn run(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
