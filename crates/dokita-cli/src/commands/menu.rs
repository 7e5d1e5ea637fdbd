use anyhow::Result;
use std::path::Path;

use dokita_nav::{NavEntry, dokita_sidebar, load_tree, visible_menu, visible_menu_recursive};

use super::Context;

pub async fn run(
    ctx: &Context,
    tree: Option<&Path>,
    recursive: bool,
    offline: bool,
) -> Result<()> {
    let tree = match tree {
        Some(path) => load_tree(path)?,
        None => dokita_sidebar(),
    };
    let auth = ctx.authorizer(offline).await?;
    let check = |r: &dokita_auth::Requirement| auth.has_permission(r);
    let visible = if recursive {
        visible_menu_recursive(&tree, check)
    } else {
        visible_menu(&tree, check)
    };

    if visible.is_empty() {
        println!("No menu entries visible.");
        return Ok(());
    }
    print_entries(&visible, 0);
    Ok(())
}

fn print_entries(entries: &[NavEntry], depth: usize) {
    for entry in entries {
        println!(
            "{}{:<28} {}",
            "  ".repeat(depth),
            entry.name,
            entry.path
        );
        print_entries(&entry.children, depth + 1);
    }
}
