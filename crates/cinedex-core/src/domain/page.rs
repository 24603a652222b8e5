use crate::error::DomainError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 8;

/// Largest offset or limit a SQL backend accepts (a signed 64-bit integer).
const MAX_ROWS: u64 = i64::MAX as u64;

/// A 1-based page request.
///
/// `limit` has no upper bound of its own, but the offset and the limit must
/// both fit in a signed 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if limit < 1 {
            return Err(DomainError::validation("limit must be at least 1"));
        }
        let in_range = limit <= MAX_ROWS
            && (page - 1)
                .checked_mul(limit)
                .is_some_and(|offset| offset <= MAX_ROWS);
        if !in_range {
            return Err(DomainError::validation("page is out of range"));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        // Bounded in `new`.
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            total_pages: total.div_ceil(request.limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}
