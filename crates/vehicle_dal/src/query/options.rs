//! Caller-supplied query intent: filtering, sorting and paging.
//!
//! # Invariants
//! - Every sub-option may be omitted; repositories and services fill in
//!   defaults instead of failing.
//! - After [`QueryOptions::normalized_for_page`] paging is always present with
//!   `page_number >= 1` and `page_size >= 1`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Combined filtering, sorting and paging request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    pub filtering: Option<FilterOptions>,
    pub sorting: Option<SortOptions>,
    pub paging: Option<PagingOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Case-insensitive substring matched against the entity's text fields.
    pub search_text: Option<String>,
    /// Restricts `search_text` to one text field when it names a known one.
    pub search_field: Option<String>,
    pub make_id: Option<i64>,
    pub model_id: Option<i64>,
    /// Additional named equality filters; unknown keys are ignored.
    pub filters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortOptions {
    pub sort_by: String,
    pub sort_ascending: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            sort_by: String::new(),
            sort_ascending: true,
        }
    }
}

impl SortOptions {
    pub fn ascending(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_ascending: true,
        }
    }

    pub fn descending(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_ascending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagingOptions {
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagingOptions {
    /// Single page large enough to hold every row.
    pub fn unbounded() -> Self {
        Self {
            page_number: 1,
            page_size: i64::MAX,
        }
    }

    /// Clamps out-of-range values to the defaults.
    pub fn normalized(self) -> Self {
        Self {
            page_number: if self.page_number < 1 {
                DEFAULT_PAGE_NUMBER
            } else {
                self.page_number
            },
            page_size: if self.page_size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_size
            },
        }
    }

    /// Rows to skip before the requested page. Saturates instead of
    /// overflowing for huge page numbers.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).max(0).saturating_mul(self.page_size)
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.filtering_mut().search_text = Some(text.into());
        self
    }

    pub fn search_in(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        let filtering = self.filtering_mut();
        filtering.search_field = Some(field.into());
        filtering.search_text = Some(text.into());
        self
    }

    pub fn with_make_id(mut self, make_id: i64) -> Self {
        self.filtering_mut().make_id = Some(make_id);
        self
    }

    pub fn with_model_id(mut self, model_id: i64) -> Self {
        self.filtering_mut().model_id = Some(model_id);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filtering_mut().filters.insert(key.into(), value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.sorting = Some(SortOptions {
            sort_by: field.into(),
            sort_ascending: ascending,
        });
        self
    }

    pub fn page(mut self, page_number: i64, page_size: i64) -> Self {
        self.paging = Some(PagingOptions {
            page_number,
            page_size,
        });
        self
    }

    /// Applies the paged-listing defaults.
    ///
    /// - Missing paging becomes page 1 of 10; out-of-range values are clamped.
    /// - Missing sorting becomes `default_sort` ascending.
    pub fn normalized_for_page(mut self, default_sort: &str) -> Self {
        self.paging = Some(self.paging.unwrap_or_default().normalized());
        if self.sorting.is_none() {
            self.sorting = Some(SortOptions::ascending(default_sort));
        }
        self
    }

    /// Forces a single unbounded page so "get all" shares the paged
    /// pipeline and its filtering rules.
    pub fn normalized_for_all(mut self) -> Self {
        self.paging = Some(PagingOptions::unbounded());
        self
    }

    /// Paging to execute; defaults when the caller left it out.
    pub fn effective_paging(&self) -> PagingOptions {
        self.paging.unwrap_or_default()
    }

    fn filtering_mut(&mut self) -> &mut FilterOptions {
        self.filtering.get_or_insert_with(FilterOptions::default)
    }
}
