//! Shared types for splitting long tables into pages.

/// Controls how paged tables behave when the request leaves the page
/// query parameters out.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page to show when the request does not name one.
    pub default_page: u64,
    /// How many rows to put on a page when the request does not say.
    pub default_page_size: u64,
    /// The maximum number of numbered page links to render at once.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 50,
            max_pages: 5,
        }
    }
}

/// An element in the pagination row at the bottom of a paged table.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationItem {
    /// A link to another page.
    Link(u64),
    /// The page currently being displayed.
    Current(u64),
    /// Stands in for a skipped stretch of pages.
    Gap,
    /// A link one page forward.
    Next(u64),
    /// A link one page back.
    Back(u64),
}

/// Build the pagination row for `current_page` out of `page_count` pages.
///
/// At most `max_pages` numbered links are shown. When there are more pages
/// than that, the links slide with the current page and a gap marker stands
/// in for the skipped stretch, with the first and last page always reachable.
pub fn pagination_items(current_page: u64, page_count: u64, max_pages: u64) -> Vec<PaginationItem> {
    let (window_start, window_end) = page_window(current_page, page_count, max_pages);
    let mut items = Vec::new();

    if current_page > 1 {
        items.push(PaginationItem::Back(current_page - 1));
    }

    if window_start > 1 {
        items.push(PaginationItem::Link(1));
        items.push(PaginationItem::Gap);
    }

    items.extend((window_start..=window_end).map(|page| {
        if page == current_page {
            PaginationItem::Current(page)
        } else {
            PaginationItem::Link(page)
        }
    }));

    if window_end < page_count {
        items.push(PaginationItem::Gap);
        items.push(PaginationItem::Link(page_count));
    }

    if current_page < page_count {
        items.push(PaginationItem::Next(current_page + 1));
    }

    items
}

/// The inclusive range of page numbers to show links for.
///
/// The window is `max_pages` wide and pinned at either end of the page
/// range, so it never shrinks as the current page approaches an edge.
fn page_window(current_page: u64, page_count: u64, max_pages: u64) -> (u64, u64) {
    if page_count <= max_pages {
        return (1, page_count);
    }

    let half_window = max_pages / 2;

    if current_page <= half_window {
        (1, max_pages)
    } else if current_page > page_count - half_window {
        (page_count - max_pages + 1, page_count)
    } else {
        (current_page - half_window, current_page + half_window)
    }
}
