use crate::error::{DokitaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Dokita client configuration stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DokitaConfig {
    pub dokita: DokitaSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DokitaSettings {
    /// Backend base URL, e.g. `http://localhost:3004`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Rewrite an `http://` base URL to `https://` (production deployments).
    #[serde(default)]
    pub force_https: bool,
    /// Path to the persisted session (token + user) written at login.
    #[serde(default = "default_session_path")]
    pub session_path: String,
    /// Page size used when walking the permission catalog.
    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: u32,
    /// What a permission check does when the catalog is loaded but shares
    /// no name with the requirement.
    #[serde(default)]
    pub on_empty_catalog_intersection: IntersectionPolicy,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Resolution of a multi-permission requirement whose names are all absent
/// from a loaded catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntersectionPolicy {
    /// Check the requirement as written against the grant set.
    #[default]
    FallbackToRaw,
    /// Deny the check outright.
    DenyAll,
}

impl std::fmt::Display for IntersectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntersectionPolicy::FallbackToRaw => write!(f, "fallbackToRaw"),
            IntersectionPolicy::DenyAll => write!(f, "denyAll"),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3004".to_string()
}

fn default_session_path() -> String {
    "session.json".to_string()
}

fn default_catalog_page_size() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl DokitaConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DokitaError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DokitaError::TomlDe(e.to_string()))
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DokitaError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config for `dokita init`.
    pub fn default_config(base_dir: &Path) -> Self {
        Self {
            dokita: DokitaSettings {
                api_base_url: default_api_base_url(),
                force_https: false,
                session_path: base_dir.join("session.json").display().to_string(),
                catalog_page_size: default_catalog_page_size(),
                on_empty_catalog_intersection: IntersectionPolicy::default(),
                request_timeout_secs: default_request_timeout_secs(),
            },
        }
    }

    /// Resolve the config file path: `<base_dir>/dokita.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("dokita.toml")
    }

    /// Resolve the default dokita home directory: `~/.dokita`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".dokita"))
            .ok_or_else(|| DokitaError::Config("Cannot determine home directory".to_string()))
    }

    /// Load the config if present, otherwise fall back to defaults for `base_dir`.
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        match Self::load(&Self::default_path(base_dir)) {
            Ok(config) => Ok(config),
            Err(DokitaError::ConfigNotFound(_)) => Ok(Self::default_config(base_dir)),
            Err(e) => Err(e),
        }
    }
}

impl DokitaSettings {
    /// Base URL with exactly one trailing slash, ready for `join`-style
    /// concatenation (`{base}auth/login`).
    pub fn api_base(&self) -> Result<String> {
        normalize_base_url(&self.api_base_url, self.force_https)
    }

    /// Session path resolved against `base_dir` when relative.
    pub fn session_file(&self, base_dir: &Path) -> PathBuf {
        let p = Path::new(&self.session_path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    }
}

/// Normalize a backend base URL: strip trailing slashes, append one, and
/// upgrade the scheme when `force_https` is set.
pub fn normalize_base_url(raw: &str, force_https: bool) -> Result<String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(DokitaError::InvalidBaseUrl(raw.to_string()));
    }
    let upgraded = match trimmed.strip_prefix("http://") {
        Some(rest) if force_https => format!("https://{rest}"),
        _ => trimmed.to_string(),
    };
    let mut base = upgraded.trim_end_matches('/').to_string();
    base.push('/');
    Ok(base)
}
