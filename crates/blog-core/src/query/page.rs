//! Sorting and pagination

use crate::query::Filter;

pub const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc`; anything else falls back to `desc`
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl Sort {
    /// Pick `requested` if it is one of `allowed`, otherwise sort by `createdAt`
    pub fn resolve(
        requested: Option<&str>,
        allowed: &[&'static str],
        direction: SortDirection,
    ) -> Self {
        let field = requested
            .and_then(|r| allowed.iter().copied().find(|a| *a == r))
            .unwrap_or(DEFAULT_SORT_FIELD);
        Self { field, direction }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD,
            direction: SortDirection::Desc,
        }
    }
}

/// 1-based page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Zero values fall back to defaults and the size is capped
    pub fn new(page_number: u32, page_size: u32) -> Self {
        let page_size = match page_size {
            0 => Self::DEFAULT_PAGE_SIZE,
            n => n.min(Self::MAX_PAGE_SIZE),
        };
        Self {
            page_number: page_number.max(1),
            page_size,
        }
    }

    #[inline]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// Filter + sort + page for a list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub filter: Option<Filter>,
    pub sort: Sort,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn new(sort: Sort, page: PageRequest) -> Self {
        Self {
            filter: None,
            sort,
            page,
        }
    }

    /// AND an extra restriction onto the current filter
    pub fn and_filter(mut self, filter: Filter) -> Self {
        self.filter = match self.filter.take() {
            None => Some(filter),
            Some(Filter::And(mut filters)) => {
                filters.push(filter);
                Some(Filter::And(filters))
            }
            Some(existing) => Some(Filter::And(vec![existing, filter])),
        };
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page_number: request.page_number(),
            page_size: request.page_size(),
        }
    }

    /// Total pages, rounding up
    pub fn pages_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}
