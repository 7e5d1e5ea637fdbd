pub mod catalog;
pub mod client;
pub mod error;
pub mod permissions;
pub mod session;
pub mod types;

pub use catalog::{PermissionCatalog, PermissionPage, PermissionSource, fetch_catalog, load_catalog_or_empty};
pub use client::ApiClient;
pub use dokita_core::IntersectionPolicy;
pub use error::AuthError;
pub use permissions::{ADMIN_PANEL, ALL_PERMISSIONS, Authorizer, GrantSet, PERMISSIONS, Requirement};
pub use session::{FileSessionStore, SessionProvider, StaticSession};
pub use types::*;
