use anyhow::{Result, bail};

use dokita_auth::{PermissionSource, SessionProvider, fetch_catalog};

use super::Context;

pub async fn run(ctx: &Context, page: u32, limit: u32, all: bool) -> Result<()> {
    let Some(token) = ctx.session().token() else {
        bail!("not signed in, run `dokita login` first");
    };
    let client = ctx.client()?.with_token(Some(token));

    if all {
        let catalog = fetch_catalog(&client, ctx.config.dokita.catalog_page_size).await?;
        println!("{} permissions", catalog.len());
        for name in catalog.iter() {
            println!("  {name}");
        }
        return Ok(());
    }

    let result = client.list_permissions(page, limit).await?;
    if result.items.is_empty() {
        println!("No permissions found.");
        return Ok(());
    }

    println!("{:<8} {:<32} {}", "ID", "NAME", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for p in &result.items {
        println!(
            "{:<8} {:<32} {}",
            p.permission_id,
            p.name,
            p.description.as_deref().unwrap_or("")
        );
    }
    println!(
        "\nPage {} ({} per page), {} total",
        result.page, result.limit, result.total
    );

    Ok(())
}
