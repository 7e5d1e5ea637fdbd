pub mod check;
pub mod config;
pub mod init;
pub mod login;
pub mod logout;
pub mod menu;
pub mod permissions;
pub mod whoami;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use dokita_auth::{
    ApiClient, Authorizer, FileSessionStore, PermissionCatalog, SessionProvider,
    load_catalog_or_empty,
};
use dokita_core::DokitaConfig;

/// Resolved configuration shared by the commands.
pub struct Context {
    pub base_dir: PathBuf,
    pub config: DokitaConfig,
    pub api_base: String,
}

impl Context {
    pub fn load(base_dir: PathBuf, api_url: Option<String>) -> Result<Self> {
        let mut config = DokitaConfig::load_or_default(&base_dir)?;
        if let Some(url) = api_url {
            config.dokita.api_base_url = url;
        }
        let api_base = config.dokita.api_base()?;
        Ok(Self {
            base_dir,
            config,
            api_base,
        })
    }

    pub fn session(&self) -> FileSessionStore {
        FileSessionStore::new(self.config.dokita.session_file(&self.base_dir))
    }

    pub fn client(&self) -> Result<ApiClient> {
        let timeout = Duration::from_secs(self.config.dokita.request_timeout_secs);
        Ok(ApiClient::new(&self.api_base, timeout)?)
    }

    /// Authorizer over the stored session and, unless `offline`, the live
    /// catalog (best effort).
    pub async fn authorizer(&self, offline: bool) -> Result<Authorizer> {
        let session = self.session();
        let catalog = match session.token() {
            Some(token) if !offline => {
                let client = self.client()?.with_token(Some(token));
                load_catalog_or_empty(&client, self.config.dokita.catalog_page_size).await
            }
            _ => PermissionCatalog::default(),
        };
        Ok(Authorizer::from_session(
            &session,
            catalog,
            self.config.dokita.on_empty_catalog_intersection,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn api_url_override_wins() {
        let tmp = TempDir::new().unwrap();
        let ctx = Context::load(
            tmp.path().to_path_buf(),
            Some("https://api.dokita.test".into()),
        )
        .unwrap();
        assert_eq!(ctx.api_base, "https://api.dokita.test/");
    }

    #[test]
    fn session_lives_under_base_dir_by_default() {
        let tmp = TempDir::new().unwrap();
        let ctx = Context::load(tmp.path().to_path_buf(), None).unwrap();
        assert_eq!(ctx.session().path(), tmp.path().join("session.json"));
    }

    #[tokio::test]
    async fn offline_authorizer_without_session_has_no_grants() {
        let tmp = TempDir::new().unwrap();
        let ctx = Context::load(tmp.path().to_path_buf(), None).unwrap();
        let auth = ctx.authorizer(true).await.unwrap();
        assert!(auth.grants().is_empty());
        assert!(auth.catalog().is_empty());
    }
}
