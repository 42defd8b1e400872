//! Pagination types
//!
//! The upstream paginates list endpoints with an opaque cursor:
//! `{ "values": [...], "nextCursor": "..." | null }`.

use crate::error::{Error, Result};
use crate::http::QueryParams;
use crate::types::JsonValue;
use std::sync::Arc;

/// Body field carrying the next page's cursor
pub const NEXT_CURSOR_FIELD: &str = "nextCursor";
/// Body field carrying a page's items
pub const VALUES_FIELD: &str = "values";
/// Query parameter names sent on every page
pub const LIMIT_PARAM: &str = "limit";
pub const CURSOR_PARAM: &str = "cursor";

/// Opaque cursor; `None` marks the last page
pub type PageCursor = Option<String>;

/// Read the next cursor from a page body
///
/// Null, absent, non-string and empty values all end pagination.
pub fn next_cursor(body: &JsonValue) -> PageCursor {
    body.get(NEXT_CURSOR_FIELD)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Custom item extraction function
pub type ExtractFn = dyn Fn(&JsonValue) -> Option<Vec<JsonValue>> + Send + Sync;

/// How to pull the item sequence out of a page body
#[derive(Clone, Default)]
pub enum ItemExtractor {
    /// The `values` array
    #[default]
    Values,
    /// An array under another top-level field
    Field(String),
    /// The whole body is a single item (single-object endpoints)
    WholeBody,
    /// Caller-supplied extraction; `None` means the page has the wrong shape
    Custom(Arc<ExtractFn>),
}

impl ItemExtractor {
    /// Wrap a closure as an extractor
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&JsonValue) -> Option<Vec<JsonValue>> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Extract items from one page, failing loudly on an unexpected shape
    pub fn extract(&self, path: &str, body: &JsonValue) -> Result<Vec<JsonValue>> {
        match self {
            ItemExtractor::Values => array_field(path, body, VALUES_FIELD),
            ItemExtractor::Field(field) => array_field(path, body, field),
            ItemExtractor::WholeBody => Ok(vec![body.clone()]),
            ItemExtractor::Custom(f) => f(body).ok_or_else(|| {
                Error::pagination(path, "custom extractor rejected the response body")
            }),
        }
    }
}

fn array_field(path: &str, body: &JsonValue, field: &str) -> Result<Vec<JsonValue>> {
    match body.get(field) {
        Some(JsonValue::Array(items)) => Ok(items.clone()),
        Some(other) => Err(Error::pagination(
            path,
            format!("expected '{field}' to be an array, got {}", json_kind(other)),
        )),
        None => Err(Error::pagination(
            path,
            format!("response body has no '{field}' field"),
        )),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

impl std::fmt::Debug for ItemExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Values => f.write_str("Values"),
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::WholeBody => f.write_str("WholeBody"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Parameters for one `fetch_all_pages` run
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Caller query; may override `limit`
    pub query: QueryParams,
    pub extractor: ItemExtractor,
}

impl PageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.query.set(key, value);
        self
    }

    /// Override the page size for this run
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.param(LIMIT_PARAM, limit)
    }

    #[must_use]
    pub fn extractor(mut self, extractor: ItemExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Query for one page: `limit`, then caller parameters, then `cursor`
    pub fn page_query(&self, default_limit: u32, cursor: &PageCursor) -> QueryParams {
        let mut query = QueryParams::new().with(LIMIT_PARAM, default_limit);
        query.extend(&self.query);
        query.set(
            CURSOR_PARAM,
            cursor.clone().map_or(JsonValue::Null, JsonValue::String),
        );
        query
    }
}

/// Tracks pagination progress during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    pub cursor: PageCursor,
    /// Pages fetched so far
    pub pages: u32,
    /// Items collected so far
    pub total_fetched: u64,
    pub done: bool,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page and its cursor
    pub fn advance(&mut self, items: usize, cursor: PageCursor) {
        self.pages += 1;
        self.total_fetched += items as u64;
        self.done = cursor.is_none();
        self.cursor = cursor;
    }
}
