use anyhow::Result;

use dokita_core::DokitaConfig;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config_path = DokitaConfig::default_path(&ctx.base_dir);
    let s = &ctx.config.dokita;

    if config_path.exists() {
        println!("Config: {}", config_path.display());
    } else {
        println!("Config: defaults (no {} yet)", config_path.display());
    }
    println!();
    println!("  API base:        {}", ctx.api_base);
    println!("  Force HTTPS:     {}", s.force_https);
    println!("  Session file:    {}", s.session_file(&ctx.base_dir).display());
    println!("  Catalog page:    {}", s.catalog_page_size);
    println!("  Empty catalog intersection: {}", s.on_empty_catalog_intersection);
    println!("  Request timeout: {}s", s.request_timeout_secs);

    Ok(())
}
