//! Feed pagination.

use crate::constants::{DEFAULT_PAGE, POSTS_PER_PAGE};
use crate::error::{DomainError, DomainResult};

/// A validated page of the post feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
}

impl PageRequest {
    /// Build from the optional page argument.
    ///
    /// A missing page or page 0 means the first page; negative pages are
    /// rejected.
    pub fn from_page(page: Option<i32>) -> DomainResult<Self> {
        let page = match page {
            None | Some(0) => DEFAULT_PAGE,
            Some(p) if p < 0 => return Err(DomainError::invalid_field("page", "Page is invalid")),
            Some(p) => p as u64,
        };
        Ok(Self { page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Number of documents to skip
    pub fn skip(&self) -> u64 {
        (self.page - 1) * POSTS_PER_PAGE
    }

    /// Maximum number of documents to return
    pub fn limit(&self) -> i64 {
        POSTS_PER_PAGE as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE }
    }
}
