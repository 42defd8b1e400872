//! Pagination module
//!
//! # Overview
//!
//! List endpoints return `{ values: [...], nextCursor }`. The aggregator
//! requests pages with `limit` and `cursor` query parameters, runs each one
//! through the retry governor, and returns the concatenated items.

mod aggregator;
mod types;

pub use types::{
    next_cursor, ExtractFn, ItemExtractor, PageCursor, PageRequest, PaginationState,
    CURSOR_PARAM, LIMIT_PARAM, NEXT_CURSOR_FIELD, VALUES_FIELD,
};
