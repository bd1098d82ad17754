//! Page window over the filtered and sorted rows

use serde::{Deserialize, Serialize};

/// Page size used when the host does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Who is responsible for paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// The engine slices the filtered and sorted rows
    #[default]
    Client,
    /// The host hands over an already paged set
    Server,
}

/// Current pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    pub mode: PaginationMode,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Client,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    pub fn client(page_index: usize, page_size: usize) -> Self {
        Self {
            mode: PaginationMode::Client,
            page_index,
            page_size,
        }
    }

    pub fn server() -> Self {
        Self {
            mode: PaginationMode::Server,
            ..Self::default()
        }
    }

    /// Range of positions in the sorted set covered by the current page.
    ///
    /// Out-of-range pages and a zero page size give an empty range.
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        match self.mode {
            PaginationMode::Server => 0..total,
            PaginationMode::Client => {
                let start = self.page_index.saturating_mul(self.page_size).min(total);
                let end = start.saturating_add(self.page_size).min(total);
                start..end
            }
        }
    }

    /// Position in the sorted set of the first row on this page
    pub fn offset(&self) -> usize {
        match self.mode {
            PaginationMode::Server => 0,
            PaginationMode::Client => self.page_index.saturating_mul(self.page_size),
        }
    }
}

/// Slice the current page out of `rows`
pub fn slice<'a, T>(rows: &'a [T], config: &PaginationConfig) -> &'a [T] {
    &rows[config.window(rows.len())]
}

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, config: &PaginationConfig) -> usize {
    match config.mode {
        PaginationMode::Server => 1,
        PaginationMode::Client if config.page_size == 0 => 0,
        PaginationMode::Client => total.div_ceil(config.page_size),
    }
}
