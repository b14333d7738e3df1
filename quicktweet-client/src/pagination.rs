//! Client-side pagination over an already fetched collection.
//!
//! All inputs are clamped, never rejected: a zero page size is treated as one,
//! and out-of-range pages snap to the nearest valid page.

/// Number of pages needed for `item_count` items. Zero when there are no items.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// Clamp a requested one-based page into `1..=max(1, total_pages)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    pub page: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn controls(&self) -> PageControls {
        PageControls::new(self.page, self.total_pages)
    }
}

/// Slice out the visible page, preserving input order.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(requested_page, total_pages);
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start..end],
        total_pages,
        page,
    }
}

/// The page-number buttons to render around the current page.
///
/// The window is asymmetric: up to three pages before the current one and one
/// after it, widening to run through the last page once the current page is
/// within three of the end.
pub fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    let page = clamp_page(page, total_pages);
    let start = if page > 3 { page - 3 } else { 0 };
    let end = if page.saturating_add(3) < total_pages { page + 2 } else { total_pages };
    (1..=total_pages).skip(start).take(end.saturating_sub(start)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControls {
    pub first: usize,
    pub prev: usize,
    pub window: Vec<usize>,
    pub next: usize,
    pub last: usize,
    pub current: usize,
}

impl PageControls {
    /// Targets of every control for `page` of `total_pages`. Boundary controls
    /// point back at the current page.
    pub fn new(page: usize, total_pages: usize) -> Self {
        let page = clamp_page(page, total_pages);
        let last = total_pages.max(1);
        Self {
            first: 1,
            prev: page.saturating_sub(1).max(1),
            window: page_window(page, total_pages),
            next: (page + 1).min(last),
            last,
            current: page,
        }
    }

    /// Controls are hidden entirely for an empty collection.
    pub fn is_visible(&self) -> bool {
        !self.window.is_empty()
    }
}

/// The caller's stored page, kept valid against a collection that can shrink
/// or grow between fetch cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page_size, self.current)
    }

    pub fn go_to(&mut self, page: usize, item_count: usize) -> usize {
        self.current = clamp_page(page, total_pages(item_count, self.page_size));
        self.current
    }

    pub fn first(&mut self, item_count: usize) -> usize {
        self.go_to(1, item_count)
    }

    pub fn prev(&mut self, item_count: usize) -> usize {
        self.go_to(self.current.saturating_sub(1), item_count)
    }

    pub fn next(&mut self, item_count: usize) -> usize {
        self.go_to(self.current + 1, item_count)
    }

    pub fn last(&mut self, item_count: usize) -> usize {
        self.go_to(total_pages(item_count, self.page_size), item_count)
    }
}
