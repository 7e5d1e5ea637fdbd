use anyhow::Result;
use std::path::Path;

use dokita_core::DokitaConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    println!("Initializing Dokita in {}", base_dir.display());
    std::fs::create_dir_all(base_dir)?;

    let config_path = DokitaConfig::default_path(base_dir);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        let config = DokitaConfig::default_config(base_dir);
        config.save(&config_path)?;
        println!("Created config: {}", config_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Set api_base_url in {}", config_path.display());
    println!("  2. Run `dokita login --phone <number>`");

    Ok(())
}
