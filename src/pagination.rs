use serde::Serialize;

use crate::domain::listing::{Listing, PageDescriptor};
use crate::domain::query::FilterParams;

/// Viewport class deciding how many page buttons fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewport {
    Narrow,
    Wide,
}

impl Viewport {
    pub const fn max_visible(self) -> u32 {
        match self {
            Self::Narrow => 3,
            Self::Wide => 10,
        }
    }
}

/// Page numbers to render plus the truncation markers around them.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PaginationWindow {
    pub pages: Vec<u32>,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
}

impl PaginationWindow {
    /// Computes the window of at most `max_visible` pages around `current_page`.
    pub fn compute(current_page: u32, total_pages: u32, max_visible: u32) -> Self {
        if total_pages == 0 || max_visible == 0 {
            return Self::default();
        }

        let (start, end) = if total_pages <= max_visible {
            (1, total_pages)
        } else {
            let half = max_visible / 2;
            let current = current_page.clamp(1, total_pages);
            if current <= half {
                (1, max_visible)
            } else if current > total_pages - half {
                (total_pages - max_visible + 1, total_pages)
            } else {
                let start = current - half;
                let end = (start + max_visible - 1).min(total_pages);
                (end + 1 - max_visible, end)
            }
        };

        Self {
            pages: (start..=end).collect(),
            leading_ellipsis: start > 1,
            trailing_ellipsis: end < total_pages,
        }
    }

    pub fn for_viewport(page: &PageDescriptor, viewport: Viewport) -> Self {
        Self::compute(page.current_page, page.total_pages, viewport.max_visible())
    }
}

/// A page link already resolved against the current filters.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Everything the pagination partial needs for one viewport class.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WindowLinks {
    pub pages: Vec<PageLink>,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
}

/// Pagination controls rendered under every list.
///
/// Links are only produced for pages inside `[1, total_pages]`, so the
/// template cannot navigate to an out-of-range page.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub first_href: String,
    pub last_href: Option<String>,
    pub narrow: WindowLinks,
    pub wide: WindowLinks,
}

impl PaginationControls {
    pub fn new(base_path: &str, params: &FilterParams, page: &PageDescriptor) -> Self {
        let href = |number: u32| format!("{base_path}{}", params.with_page(number).href_suffix());
        let links = |viewport: Viewport| {
            let window = PaginationWindow::for_viewport(page, viewport);
            WindowLinks {
                pages: window
                    .pages
                    .iter()
                    .map(|&number| PageLink {
                        number,
                        href: href(number),
                        current: number == page.current_page,
                    })
                    .collect(),
                leading_ellipsis: window.leading_ellipsis,
                trailing_ellipsis: window.trailing_ellipsis,
            }
        };

        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            prev_href: page.prev().map(href),
            next_href: page.next().map(href),
            first_href: href(1),
            last_href: page.target(page.total_pages).map(href),
            narrow: links(Viewport::Narrow),
            wide: links(Viewport::Wide),
        }
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: PageDescriptor,
    pub controls: PaginationControls,
}

impl<T> Paginated<T> {
    pub fn new(listing: Listing<T>, base_path: &str, params: &FilterParams) -> Self {
        let controls = PaginationControls::new(base_path, params, &listing.page);
        Self {
            items: listing.items,
            page: listing.page,
            controls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(current_page: u32, total_pages: u32) -> PageDescriptor {
        PageDescriptor {
            current_page,
            total_pages,
            page_size: 12,
            total: u64::from(total_pages) * 12,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    #[test]
    fn middle_pages_are_centered_with_both_markers() {
        let window = PaginationWindow::compute(10, 20, 10);
        assert_eq!(window.pages, (5..=14).collect::<Vec<_>>());
        assert!(window.leading_ellipsis);
        assert!(window.trailing_ellipsis);

        let window = PaginationWindow::compute(5, 9, 3);
        assert_eq!(window.pages, vec![4, 5, 6]);
    }

    #[test]
    fn pinned_near_edges() {
        assert_eq!(PaginationWindow::compute(5, 20, 10).pages, (1..=10).collect::<Vec<_>>());
        assert_eq!(PaginationWindow::compute(16, 20, 10).pages, (11..=20).collect::<Vec<_>>());
        assert_eq!(PaginationWindow::compute(2, 9, 3).pages, vec![1, 2, 3]);
        assert_eq!(PaginationWindow::compute(9, 9, 3).pages, vec![7, 8, 9]);
    }

    #[test]
    fn controls_link_only_reachable_pages() {
        let params = FilterParams::parse("search=cat");
        let controls = PaginationControls::new("/books", &params, &descriptor(1, 3));
        assert_eq!(controls.prev_href, None);
        assert_eq!(controls.next_href.as_deref(), Some("/books?search=cat&page=2"));
        assert_eq!(controls.first_href, "/books?search=cat");
        assert_eq!(controls.wide.pages.len(), 3);
        assert!(controls.wide.pages[0].current);

        let empty = PaginationControls::new("/books", &params, &descriptor(1, 0));
        assert_eq!(empty.prev_href, None);
        assert_eq!(empty.next_href, None);
        assert_eq!(empty.last_href, None);
        assert!(empty.narrow.pages.is_empty());
    }
}
