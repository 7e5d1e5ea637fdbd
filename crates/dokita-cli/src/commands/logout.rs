use anyhow::Result;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.session().clear()?;
    println!("Signed out.");
    Ok(())
}
