//! The permission catalog: every permission name the backend currently
//! defines, fetched page by page and kept as a flat set.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AuthError;
use crate::types::Permission;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCatalog(BTreeSet<String>);

impl PermissionCatalog {
    pub fn from_permissions(perms: &[Permission]) -> Self {
        perms.iter().map(|p| p.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Empty means "not loaded yet" as far as permission checks go.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionPage {
    pub items: Vec<Permission>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait PermissionSource: Send + Sync {
    async fn list_permissions(&self, page: u32, limit: u32) -> Result<PermissionPage, AuthError>;
}

/// Items and pagination metadata pulled out of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> ListPage<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit: 10,
        }
    }
}

/// Decode a list response in any of the envelopes the backend uses:
/// a bare array, `{data, meta}`, `{items1, meta}` or `{results, count, page, page_size}`.
/// Unknown shapes decode to an empty page.
pub fn extract_list_response<T: DeserializeOwned>(data: Value) -> Result<ListPage<T>, AuthError> {
    fn num(v: Option<&Value>) -> Option<u64> {
        v.and_then(Value::as_u64)
    }

    fn to_u32(n: u64) -> u32 {
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    fn decode<T: DeserializeOwned>(items: &Value) -> Result<Vec<T>, AuthError> {
        serde_json::from_value(items.clone())
            .map_err(|e| AuthError::InvalidResponse(format!("list items: {e}")))
    }

    if let Value::Array(_) = data {
        let items: Vec<T> = decode(&data)?;
        let len = items.len() as u64;
        return Ok(ListPage {
            items,
            total: len,
            page: 1,
            limit: to_u32(len),
        });
    }

    for key in ["data", "items1"] {
        if let Some(arr @ Value::Array(_)) = data.get(key) {
            let items: Vec<T> = decode(arr)?;
            let len = items.len() as u64;
            let meta = data.get("meta");
            let field = |name: &str| num(meta.and_then(|m| m.get(name)));
            return Ok(ListPage {
                total: field("total").or_else(|| field("count")).unwrap_or(len),
                page: to_u32(field("page").unwrap_or(1)),
                limit: to_u32(field("limit").unwrap_or(len)),
                items,
            });
        }
    }

    if let Some(arr @ Value::Array(_)) = data.get("results") {
        let items: Vec<T> = decode(arr)?;
        let len = items.len() as u64;
        return Ok(ListPage {
            total: num(data.get("count")).unwrap_or(len),
            page: to_u32(num(data.get("page")).unwrap_or(1)),
            limit: to_u32(num(data.get("page_size")).unwrap_or(len)),
            items,
        });
    }

    Ok(ListPage::empty())
}

/// Walk every page of the catalog starting at page 1, until the reported
/// total is reached or a page brings nothing new. The server may cap the
/// page size below `page_size`, so a short page does not end the walk.
pub async fn fetch_catalog(
    source: &dyn PermissionSource,
    page_size: u32,
) -> Result<PermissionCatalog, AuthError> {
    let page_size = page_size.max(1);
    let mut names = BTreeSet::new();
    let mut seen: u64 = 0;
    let mut page: u32 = 1;

    loop {
        let batch = source.list_permissions(page, page_size).await?;
        let count = batch.items.len();
        let before = names.len();
        seen += count as u64;
        names.extend(batch.items.into_iter().map(|p| p.name));
        tracing::debug!(page, count, total = batch.total, "loaded permission page");

        // A backend ignoring `page` repeats the same items.
        if count == 0 || seen >= batch.total || names.len() == before {
            break;
        }
        page = match page.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(PermissionCatalog(names))
}

/// One-shot best-effort load: any failure leaves the catalog empty.
pub async fn load_catalog_or_empty(source: &dyn PermissionSource, page_size: u32) -> PermissionCatalog {
    match fetch_catalog(source, page_size).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("permission catalog unavailable: {e}");
            PermissionCatalog::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn perm(id: i64, name: &str) -> Permission {
        Permission {
            permission_id: id,
            name: name.to_string(),
            description: None,
        }
    }

    struct PagedSource {
        all: Vec<Permission>,
        calls: Mutex<Vec<(u32, u32)>>,
    }

    #[async_trait]
    impl PermissionSource for PagedSource {
        async fn list_permissions(&self, page: u32, limit: u32) -> Result<PermissionPage, AuthError> {
            self.calls.lock().unwrap().push((page, limit));
            let start = ((page - 1) * limit) as usize;
            let items = self
                .all
                .iter()
                .skip(start)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok(PermissionPage {
                items,
                total: self.all.len() as u64,
                page,
                limit,
            })
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PermissionSource for FailingSource {
        async fn list_permissions(&self, _: u32, _: u32) -> Result<PermissionPage, AuthError> {
            Err(AuthError::Unauthorized)
        }
    }

    #[tokio::test]
    async fn walks_all_pages() {
        let all: Vec<Permission> = (0..5).map(|i| perm(i, &format!("PERM_{i}"))).collect();
        let source = PagedSource {
            all,
            calls: Mutex::new(Vec::new()),
        };
        let catalog = fetch_catalog(&source, 2).await.unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.contains("PERM_4"));
        assert_eq!(*source.calls.lock().unwrap(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[tokio::test]
    async fn stops_when_total_reached() {
        let all: Vec<Permission> = (0..4).map(|i| perm(i, &format!("PERM_{i}"))).collect();
        let source = PagedSource {
            all,
            calls: Mutex::new(Vec::new()),
        };
        fetch_catalog(&source, 2).await.unwrap();
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }

    struct CappedSource {
        all: Vec<Permission>,
        cap: u32,
    }

    #[async_trait]
    impl PermissionSource for CappedSource {
        async fn list_permissions(&self, page: u32, limit: u32) -> Result<PermissionPage, AuthError> {
            let limit = limit.min(self.cap);
            let start = ((page - 1) * limit) as usize;
            Ok(PermissionPage {
                items: self.all.iter().skip(start).take(limit as usize).cloned().collect(),
                total: self.all.len() as u64,
                page,
                limit,
            })
        }
    }

    #[tokio::test]
    async fn server_capped_page_size_still_loads_everything() {
        let all: Vec<Permission> = (0..45).map(|i| perm(i, &format!("P{i:02}"))).collect();
        let source = CappedSource { all, cap: 20 };
        let catalog = fetch_catalog(&source, 100).await.unwrap();
        assert_eq!(catalog.len(), 45);
        assert!(catalog.contains("P30"));
        assert!(catalog.contains("P44"));

        let auth = crate::permissions::Authorizer::new(
            ["P30"].into_iter().collect(),
            catalog,
            dokita_core::IntersectionPolicy::FallbackToRaw,
        );
        assert!(auth.has_permission(&["P00", "P30"].into()));
    }

    struct RepeatingSource;

    #[async_trait]
    impl PermissionSource for RepeatingSource {
        async fn list_permissions(&self, page: u32, limit: u32) -> Result<PermissionPage, AuthError> {
            Ok(PermissionPage {
                items: vec![perm(1, "LIST_USERS"), perm(2, "LIST_ROLES")],
                total: 50,
                page,
                limit,
            })
        }
    }

    #[tokio::test]
    async fn page_without_new_names_ends_walk() {
        let catalog = fetch_catalog(&RepeatingSource, 2).await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn failure_yields_empty_catalog() {
        let catalog = load_catalog_or_empty(&FailingSource, 50).await;
        assert!(catalog.is_empty());
        assert!(!catalog.is_loaded());
    }

    #[test]
    fn extract_bare_array() {
        let page: ListPage<Permission> =
            extract_list_response(json!([{"permissionId": 1, "name": "LIST_USERS"}])).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn extract_data_envelope() {
        let page: ListPage<Permission> = extract_list_response(json!({
            "data": [{"permissionId": 1, "name": "LIST_USERS"}],
            "meta": {"count": 42, "page": 3, "limit": 1}
        }))
        .unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn extract_items1_envelope_without_meta() {
        let page: ListPage<Permission> = extract_list_response(json!({
            "items1": [{"permissionId": 1, "name": "A"}, {"permissionId": 2, "name": "B"}]
        }))
        .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn extract_results_envelope() {
        let page: ListPage<Permission> = extract_list_response(json!({
            "results": [{"permissionId": 1, "name": "A"}],
            "count": 9, "page": 2, "page_size": 1
        }))
        .unwrap();
        assert_eq!((page.total, page.page, page.limit), (9, 2, 1));
    }

    #[test]
    fn extract_oversized_meta_saturates() {
        let page: ListPage<Permission> = extract_list_response(json!({
            "data": [],
            "meta": {"total": 1, "page": 5_000_000_000u64, "limit": 5_000_000_000u64}
        }))
        .unwrap();
        assert_eq!(page.page, u32::MAX);
        assert_eq!(page.limit, u32::MAX);
    }

    #[test]
    fn extract_unknown_shape_is_empty() {
        let page: ListPage<Permission> = extract_list_response(json!({"foo": 1})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.limit, 10);
        let page: ListPage<Permission> = extract_list_response(Value::Null).unwrap();
        assert!(page.items.is_empty());
    }
}
