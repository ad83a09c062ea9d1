//! Page bounds and the page-number window
//!
//! The server owns the cursor: a page request is only checked against the
//! last known bounds, and the bounds are replaced wholesale by whatever the
//! next successful response reports.

use crate::anilist::PageInfo;

/// Pages shown either side of the current one
const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: u32,
    last: u32,
}

/// One slot in the page-number control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { current: 1, last: 1 }
    }
}

impl Paginator {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// `Some(page)` when the page lies inside `[1, last]`
    pub fn request(&self, page: u32) -> Option<u32> {
        (1..=self.last).contains(&page).then_some(page)
    }

    pub fn previous(&self) -> Option<u32> {
        self.current.checked_sub(1).and_then(|p| self.request(p))
    }

    pub fn next(&self) -> Option<u32> {
        self.request(self.current.saturating_add(1))
    }

    /// Take over the bounds the server reported
    pub fn adopt(&mut self, info: &PageInfo) {
        self.last = info.last_page.max(1);
        self.current = info.current_page.clamp(1, self.last);
    }

    /// Whether there is anything to navigate between
    pub fn has_pages(&self) -> bool {
        self.last > 1
    }

    /// First page, last page and the pages around the current one, with
    /// gaps where numbers are skipped
    pub fn window(&self) -> Vec<PageSlot> {
        let low = self.current.saturating_sub(WINDOW_RADIUS).max(1);
        let high = self.current.saturating_add(WINDOW_RADIUS).min(self.last);

        let mut pages = vec![1];
        pages.extend(low..=high);
        pages.push(self.last);
        pages.sort_unstable();
        pages.dedup();

        let mut slots = Vec::with_capacity(pages.len() + 2);
        let mut prev: Option<u32> = None;
        for page in pages {
            if let Some(prev) = prev {
                if page - prev > 1 {
                    slots.push(PageSlot::Gap);
                }
            }
            slots.push(PageSlot::Page(page));
            prev = Some(page);
        }
        slots
    }
}
