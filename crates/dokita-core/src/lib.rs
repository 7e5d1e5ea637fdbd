pub mod config;
pub mod error;

pub use config::{DokitaConfig, DokitaSettings, IntersectionPolicy};
pub use error::{DokitaError, Result};
