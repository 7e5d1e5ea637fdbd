use std::path::Path;

use dokita_auth::Requirement;
use serde::{Deserialize, Serialize};

/// One node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Requirement::is_none")]
    pub required_permission: Requirement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    pub fn new(name: &str, path: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            icon: icon.to_string(),
            required_permission: Requirement::None,
            children: Vec::new(),
        }
    }

    pub fn requires(mut self, required: impl Into<Requirement>) -> Self {
        self.required_permission = required.into();
        self
    }

    pub fn with_children(mut self, children: Vec<NavEntry>) -> Self {
        self.children = children;
        self
    }
}

/// Entries the current session may see, in their original order.
///
/// Two levels are filtered: children are kept when their own requirement
/// passes, with their sub-entries copied unchanged. A top-level entry
/// survives when its requirement passes or when at least one child survives,
/// so a gated section stays visible as a container for the pages beneath it.
pub fn visible_menu<F>(tree: &[NavEntry], has_permission: F) -> Vec<NavEntry>
where
    F: Fn(&Requirement) -> bool,
{
    tree.iter()
        .filter_map(|entry| {
            let children: Vec<NavEntry> = entry
                .children
                .iter()
                .filter(|child| has_permission(&child.required_permission))
                .cloned()
                .collect();
            keep(entry, children, &has_permission)
        })
        .collect()
}

/// Like [`visible_menu`] but applied at every depth: children are filtered
/// first, then each entry is kept when its requirement passes or any child
/// survives.
pub fn visible_menu_recursive<F>(tree: &[NavEntry], has_permission: F) -> Vec<NavEntry>
where
    F: Fn(&Requirement) -> bool,
{
    filter_level(tree, &has_permission)
}

fn filter_level<F>(entries: &[NavEntry], has_permission: &F) -> Vec<NavEntry>
where
    F: Fn(&Requirement) -> bool,
{
    entries
        .iter()
        .filter_map(|entry| {
            let children = filter_level(&entry.children, has_permission);
            keep(entry, children, has_permission)
        })
        .collect()
}

fn keep<F>(entry: &NavEntry, children: Vec<NavEntry>, has_permission: &F) -> Option<NavEntry>
where
    F: Fn(&Requirement) -> bool,
{
    if has_permission(&entry.required_permission) || !children.is_empty() {
        Some(NavEntry {
            name: entry.name.clone(),
            path: entry.path.clone(),
            icon: entry.icon.clone(),
            required_permission: entry.required_permission.clone(),
            children,
        })
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid navigation tree: {0}")]
    Parse(String),
}

#[derive(Deserialize)]
struct TreeFile {
    #[serde(default)]
    entries: Vec<NavEntry>,
}

/// Load a navigation tree from TOML (`[[entries]]` tables, nested
/// `[[entries.children]]`).
pub fn load_tree(path: &Path) -> Result<Vec<NavEntry>, NavError> {
    let content = std::fs::read_to_string(path)?;
    let file: TreeFile = toml::from_str(&content).map_err(|e| NavError::Parse(e.to_string()))?;
    Ok(file.entries)
}
