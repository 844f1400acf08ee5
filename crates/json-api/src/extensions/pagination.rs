//! Pagination query and response helpers.

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::StatusError,
};
use serde::{Deserialize, Serialize};

use bookstore_app::domain::pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};

use crate::extensions::*;

/// Build a validated page request from the `page` and `page_size` query params.
pub(crate) fn page_request(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
) -> Result<PageRequest, StatusError> {
    PageRequest::new(
        page.into_inner().unwrap_or(1),
        page_size.into_inner().unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .or_400("invalid pagination parameters")
}

/// Pagination fields shared by every paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageMeta {
    /// 1-based page number
    pub current_page: u32,

    /// Requested page size
    pub page_size: u32,

    /// Number of pages available
    pub total_pages: u64,

    /// Number of matching items across all pages
    pub total_count: u64,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.current_page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_count: page.total_count,
        }
    }
}
