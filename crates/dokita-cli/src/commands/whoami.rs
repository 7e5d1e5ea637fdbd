use anyhow::Result;

use dokita_auth::SessionProvider;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let store = ctx.session();
    let Some(session) = store.load() else {
        println!("Not signed in. Run `dokita login --phone <number>`.");
        return Ok(());
    };

    let user = &session.user;
    println!("User:     {} (id {})", user.display_name(), user.user_id);
    println!("Email:    {}", user.email);
    if let Some(ref phone) = user.phone {
        println!("Phone:    {phone}");
    }
    println!("Since:    {}", session.saved_at);

    let roles: Vec<&str> = user.roles.iter().flatten().map(|r| r.name.as_str()).collect();
    if !roles.is_empty() {
        println!("Roles:    {}", roles.join(", "));
    }

    let grants = store.current_grants();
    if grants.is_empty() {
        println!("Grants:   none");
    } else {
        println!("Grants ({}):", grants.len());
        for name in grants.iter() {
            println!("  - {name}");
        }
        if grants.is_wildcard() {
            println!("  (wildcard: every permission check passes)");
        }
    }

    Ok(())
}
