//! Page windows over a locally held, already filtered list.
//!
//! The paginator only knows how many items there are, how many fit on a page,
//! and which page is showing. The list it pages over belongs to its owner.

/// One page-selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    /// 1-based page number
    pub number: usize,
    /// Whether this is the page being shown
    pub active: bool,
}

/// Pagination state for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// Creates a paginator showing page 1. A page size of 0 is treated as 1.
    #[must_use]
    pub const fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: if page_size == 0 { 1 } else { page_size },
            current_page: 1,
        }
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total_items / page_size)`; zero when there are no items.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    const fn last_page(&self) -> usize {
        let count = self.page_count();
        if count == 0 { 1 } else { count }
    }

    /// One control per page, with the current page marked active.
    #[must_use]
    pub fn pages(&self) -> Vec<PageControl> {
        (1..=self.page_count())
            .map(|number| PageControl {
                number,
                active: number == self.current_page,
            })
            .collect()
    }

    /// Whether the previous control does anything.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the next control does anything.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    /// Goes back one page; does nothing on page 1.
    pub const fn previous(&mut self) -> usize {
        if self.has_previous() {
            self.current_page -= 1;
        }
        self.current_page
    }

    /// Goes forward one page; stays on the last page.
    pub const fn next(&mut self) -> usize {
        if self.has_next() {
            self.current_page += 1;
        }
        self.current_page
    }

    /// Jumps to `page`, clamped to the existing pages.
    pub fn select(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.last_page());
        self.current_page
    }

    /// Updates the item count after the list changed, keeping the current page
    /// when it still exists.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.last_page());
    }

    /// Items of the current page.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }
}
