pub mod menu;
pub mod sidebar;

pub use menu::{NavEntry, NavError, load_tree, visible_menu, visible_menu_recursive};
pub use sidebar::dokita_sidebar;
