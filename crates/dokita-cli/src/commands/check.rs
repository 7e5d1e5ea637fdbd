use anyhow::Result;

use dokita_auth::Requirement;

use super::Context;

pub async fn run(ctx: &Context, permissions: &[String], offline: bool) -> Result<()> {
    let auth = ctx.authorizer(offline).await?;
    let required = Requirement::any_of(permissions.iter().cloned());

    if !auth.catalog().is_loaded() {
        tracing::debug!("catalog not loaded, checking requirement as written");
    }

    auth.require(&required)?;
    println!("granted: {required}");
    Ok(())
}
