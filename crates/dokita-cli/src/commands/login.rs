use anyhow::Result;

use super::Context;

pub async fn run(ctx: &Context, phone: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password_stdout("Password: ")?,
    };

    let mut client = ctx.client()?;
    let login = client.login(phone, &password).await?;
    let store = ctx.session();
    store.save(&login)?;

    println!("Signed in as {}", login.user.display_name());
    println!("Session stored in {}", store.path().display());
    Ok(())
}
