use serde::Serialize;

/// Server-reported pagination metadata for one fetched page.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct PageDescriptor {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageDescriptor {
    /// Descriptor for an unpaginated collection delivered in one response.
    pub fn single(count: usize) -> Self {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            current_page: 1,
            total_pages: u32::from(count > 0),
            page_size: count,
            total: u64::from(count),
            has_next: false,
            has_prev: false,
        }
    }

    /// Returns `page` if it can be navigated to, `None` otherwise.
    pub fn target(&self, page: u32) -> Option<u32> {
        (page >= 1 && page <= self.total_pages).then_some(page)
    }

    pub fn prev(&self) -> Option<u32> {
        self.current_page
            .checked_sub(1)
            .and_then(|page| self.target(page))
    }

    pub fn next(&self) -> Option<u32> {
        self.current_page
            .checked_add(1)
            .and_then(|page| self.target(page))
    }
}

/// One page of adapted records with its descriptor.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub page: PageDescriptor,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
