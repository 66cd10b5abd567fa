use serde::{Deserialize, Serialize};

/// Page window requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// Metadata returned alongside every paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            total_items: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slices an already filtered and sorted listing into the requested window.
///
/// `totalItems` is the filtered count, `totalPages = ceil(totalItems /
/// pageSize)`, and the window is `[(page-1)*pageSize, page*pageSize)`. A
/// window past the end is empty, never an error. Page and page size are
/// clamped to 1 here so the formula holds whatever the wire layer rejected.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let page = request.page.max(1);
    let page_size = request.page_size.max(1);

    let total_items = items.len() as u32;
    let total_pages = total_items.div_ceil(page_size);

    let start = (page as u64 - 1).saturating_mul(page_size as u64);
    let items = if start >= items.len() as u64 {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start as usize)
            .take(page_size as usize)
            .collect()
    };

    Page {
        items,
        pagination: Pagination {
            current_page: page,
            page_size,
            total_items,
            total_pages,
        },
    }
}

/// Case-insensitive substring match.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
