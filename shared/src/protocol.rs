use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

use crate::validation::Validate;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached. A 401 on such a request ends the session.
    const REQUIRES_AUTH: bool = true;

    /// The URL path relative to the API prefix, including any query string.
    fn path(&self) -> String;

    /// The JSON body, if any.
    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        Ok(None)
    }
}

// =========================================================
// Query strings
// =========================================================

/// Server-side list filters rendered as a query string.
pub trait QueryParams {
    fn pairs(&self) -> Vec<(&'static str, String)>;

    /// `?a=1&b=2`, or an empty string when no filter is set.
    fn to_query(&self) -> String {
        query_string(&self.pairs())
    }
}

fn query_string(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("?{}", serializer.finish())
}

/// Lists that take no server-side filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoFilter;

impl QueryParams for NoFilter {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Resource collections
// =========================================================

/// A tenant-scoped record collection exposed as `COLLECTION/` and `COLLECTION/{id}`.
pub trait Resource: Clone + DeserializeOwned + 'static {
    type Filter: QueryParams + Clone + Default + PartialEq + 'static;
    /// Collection path, e.g. `/categories`.
    const COLLECTION: &'static str;
    /// Lowercase human name used in messages, e.g. `tax rate`.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// Collections that accept create, update and delete.
pub trait Editable: Resource {
    type Draft: Serialize + Validate + Clone + 'static;
}

/// Collections with a `POST {id}/activate` endpoint.
pub trait Activatable: Resource {}

/// `GET COLLECTION/?filter`
pub struct ListRequest<R: Resource> {
    pub filter: R::Filter,
}

impl<R: Resource> ListRequest<R> {
    pub fn new(filter: R::Filter) -> Self {
        Self { filter }
    }
}

impl<R: Resource> ApiRequest for ListRequest<R> {
    type Response = Vec<R>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", R::COLLECTION, self.filter.to_query())
    }
}

/// `GET COLLECTION/?filter&skip=N&limit=M`
///
/// 过滤条件里自带的 `skip`/`limit` 会被这一页的偏移量覆盖。
pub struct PageRequest<'a, R: Resource> {
    pub filter: &'a R::Filter,
    pub skip: u32,
    pub limit: u32,
}

impl<R: Resource> ApiRequest for PageRequest<'_, R> {
    type Response = Vec<R>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        let mut pairs: Vec<(&'static str, String)> = self
            .filter
            .pairs()
            .into_iter()
            .filter(|(key, _)| !matches!(*key, "skip" | "limit"))
            .collect();
        pairs.push(("skip", self.skip.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        format!("{}/{}", R::COLLECTION, query_string(&pairs))
    }
}

/// `POST COLLECTION/`
pub struct CreateRequest<'a, R: Editable> {
    pub draft: &'a R::Draft,
}

impl<R: Editable> ApiRequest for CreateRequest<'_, R> {
    type Response = R;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/", R::COLLECTION)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self.draft).map(Some)
    }
}

/// `PUT COLLECTION/{id}`
pub struct UpdateRequest<'a, R: Editable> {
    pub id: &'a str,
    pub draft: &'a R::Draft,
}

impl<R: Editable> ApiRequest for UpdateRequest<'_, R> {
    type Response = R;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", R::COLLECTION, self.id)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(self.draft).map(Some)
    }
}

/// `DELETE COLLECTION/{id}`
pub struct DeleteRequest<'a, R: Resource> {
    pub id: &'a str,
    _marker: PhantomData<R>,
}

impl<'a, R: Resource> DeleteRequest<'a, R> {
    pub fn new(id: &'a str) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ApiRequest for DeleteRequest<'_, R> {
    // 204 No Content
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", R::COLLECTION, self.id)
    }
}

/// `POST COLLECTION/{id}/activate`
pub struct ActivateRequest<'a, R: Activatable> {
    pub id: &'a str,
    _marker: PhantomData<R>,
}

impl<'a, R: Activatable> ActivateRequest<'a, R> {
    pub fn new(id: &'a str) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<R: Activatable> ApiRequest for ActivateRequest<'_, R> {
    type Response = R;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}/activate", R::COLLECTION, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityFilter, ActivityType, Category, MovementType, Product, StockFilter, StockMovement,
        TaxRate, TaxRateDraft, Transaction, TransactionFilter,
    };

    #[test]
    fn test_collection_paths() {
        assert_eq!(
            ListRequest::<Category>::new(NoFilter).path(),
            "/categories/"
        );
        let draft = TaxRateDraft::default();
        assert_eq!(
            UpdateRequest::<TaxRate> {
                id: "t1",
                draft: &draft
            }
            .path(),
            "/tax-rates/t1"
        );
        assert_eq!(DeleteRequest::<Category>::new("c9").path(), "/categories/c9");
        assert_eq!(
            ActivateRequest::<Product>::new("p1").path(),
            "/products/p1/activate"
        );
    }

    #[test]
    fn test_filters_become_query_strings() {
        let filter = StockFilter {
            product_id: Some("p 1".to_string()),
            warehouse_id: None,
            movement_type: Some(MovementType::StockIn),
        };
        assert_eq!(
            ListRequest::<StockMovement>::new(filter).path(),
            "/stock-movements/?product_id=p+1&movement_type=stock_in"
        );

        let logs = ActivityFilter {
            activity_type: Some(ActivityType::SettingsChange),
            entity_type: None,
            limit: Some(50),
        };
        assert_eq!(logs.to_query(), "?activity_type=SETTINGS_CHANGE&limit=50");
    }

    #[test]
    fn test_page_request_overrides_filter_paging() {
        let filter = TransactionFilter {
            start_date: crate::date::parse_date("2024-01-01"),
            skip: Some(7),
            limit: Some(5),
            ..TransactionFilter::default()
        };
        let page = PageRequest::<Transaction> {
            filter: &filter,
            skip: 200,
            limit: 100,
        };
        assert_eq!(
            page.path(),
            "/transactions/?start_date=2024-01-01&skip=200&limit=100"
        );
        assert_eq!(
            PageRequest::<Category> {
                filter: &NoFilter,
                skip: 0,
                limit: 100
            }
            .path(),
            "/categories/?skip=0&limit=100"
        );
    }
}
