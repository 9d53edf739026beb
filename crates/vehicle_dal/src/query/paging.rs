//! Immutable paging envelope returned by every paged query.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected paging input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    PageSize(i64),
    PageNumber(i64),
    TotalCount(i64),
}

impl Display for PagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageSize(value) => write!(f, "page size must be at least 1, got {value}"),
            Self::PageNumber(value) => write!(f, "page number must be at least 1, got {value}"),
            Self::TotalCount(value) => write!(f, "total count cannot be negative, got {value}"),
        }
    }
}

impl Error for PagingError {}

/// One page of results plus the metadata needed to request its neighbours.
///
/// `total_count` is the size of the filtered set before paging, so it stays
/// the same for every page of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    current_page: i64,
    total_pages: i64,
    page_size: i64,
    total_count: i64,
    data: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Builds the envelope and derives `total_pages = ceil(total / size)`.
    ///
    /// # Errors
    /// - `page_size < 1`, `page_number < 1` or a negative count.
    pub fn new(
        data: Vec<T>,
        total_count: i64,
        page_number: i64,
        page_size: i64,
    ) -> Result<Self, PagingError> {
        if page_size < 1 {
            return Err(PagingError::PageSize(page_size));
        }
        if page_number < 1 {
            return Err(PagingError::PageNumber(page_number));
        }
        if total_count < 0 {
            return Err(PagingError::TotalCount(total_count));
        }

        // Split form avoids overflow when page_size is i64::MAX.
        let total_pages = total_count / page_size + i64::from(total_count % page_size != 0);

        Ok(Self {
            current_page: page_number,
            total_pages,
            page_size,
            total_count,
            data,
        })
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Transforms the items while keeping paging metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
