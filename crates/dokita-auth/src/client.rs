//! HTTP client for the Dokita backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::catalog::{ListPage, PermissionPage, PermissionSource, extract_list_response};
use crate::error::AuthError;
use crate::types::{LoginRequest, LoginResponse, Permission};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` must end with `/`; paths are appended to it as-is.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn login(&mut self, phone: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let req = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        let resp = self.client.post(self.url("auth/login")).json(&req).send().await?;
        let login: LoginResponse = Self::handle_response(resp).await?;
        tracing::info!(user_id = login.user.user_id, "logged in");
        self.token = Some(login.token.clone());
        Ok(login)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AuthError> {
        let token = self.token.as_deref().ok_or(AuthError::Unauthorized)?;
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AuthError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AuthError::from_status(status, text));
        }
        resp.json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PermissionSource for ApiClient {
    async fn list_permissions(&self, page: u32, limit: u32) -> Result<PermissionPage, AuthError> {
        let body: serde_json::Value = self
            .get_json(
                "permissions",
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        let ListPage {
            items,
            total,
            page: meta_page,
            limit: meta_limit,
        } = extract_list_response::<Permission>(body)?;
        Ok(PermissionPage {
            items,
            total,
            page: meta_page,
            limit: meta_limit,
        })
    }
}
