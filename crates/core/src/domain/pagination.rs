// Pagination Calculator

/// Page boundaries derived from a server total and a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    /// `current_page` pulled back inside `1..=max(1, total_pages)`
    pub clamped_page: u32,
}

impl Pagination {
    /// Compute pagination for `current_page` (1-based).
    ///
    /// `total_pages == 0` navigates like a single page: no next, no previous.
    pub fn compute(total: u64, page_size: u32, current_page: u32) -> Self {
        let total_pages = total_pages(total, page_size);
        let current_page = current_page.max(1);

        Self {
            total_pages,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            clamped_page: current_page.min(total_pages.max(1)),
        }
    }

    /// Whether `target` is a page the user may navigate to
    pub fn allows(&self, target: u32) -> bool {
        target >= 1 && target <= self.total_pages
    }
}

/// `ceil(total / page_size)`, saturating at `u32::MAX`
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
