//! Page navigation model
//!
//! Turns `(total, limit, offset)` into the button row shown under the
//! result list: numbered pages 1 through 10, an ellipsis and a jump to the
//! last page when there are more than ten, and previous/next buttons that
//! are disabled at the boundaries.

/// Maximum number of consecutive numbered page buttons
pub const MAX_NUMBERED_PAGES: usize = 10;

/// One element of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    /// Go back one page; `target` is `None` on the first page
    Previous { target: Option<usize> },
    /// A numbered page
    Page { number: usize, active: bool },
    /// Gap between the numbered run and the last page
    Ellipsis,
    /// Go forward one page; `target` is `None` on the last page
    Next { target: Option<usize> },
}

impl PageButton {
    /// Whether clicking the button navigates anywhere
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Previous { target } | Self::Next { target } => target.is_some(),
            Self::Page { .. } => true,
            Self::Ellipsis => false,
        }
    }
}

/// Pagination position derived from the current query state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total: usize,
    limit: usize,
    offset: usize,
}

impl Pagination {
    #[must_use]
    pub const fn new(total: usize, limit: usize, offset: usize) -> Self {
        let limit = if limit == 0 { 1 } else { limit };
        Self {
            total,
            limit,
            offset,
        }
    }

    /// `ceil(total / limit)`
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total.div_ceil(self.limit)
    }

    /// 1-based page the offset points into
    #[must_use]
    pub const fn current_page(&self) -> usize {
        (self.offset / self.limit).saturating_add(1)
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page() > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Offset of the first record on 1-based `page`
    #[must_use]
    pub const fn offset_for(&self, page: usize) -> usize {
        page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Button row to render; empty when there is at most one page
    #[must_use]
    pub fn buttons(&self) -> Vec<PageButton> {
        let total_pages = self.total_pages();
        if total_pages <= 1 {
            return Vec::new();
        }

        let current = self.current_page();
        let mut buttons = Vec::with_capacity(MAX_NUMBERED_PAGES + 4);

        buttons.push(PageButton::Previous {
            target: self.has_previous().then(|| current - 1),
        });

        for number in 1..=total_pages.min(MAX_NUMBERED_PAGES) {
            buttons.push(PageButton::Page {
                number,
                active: number == current,
            });
        }

        if total_pages > MAX_NUMBERED_PAGES {
            buttons.push(PageButton::Ellipsis);
            buttons.push(PageButton::Page {
                number: total_pages,
                active: total_pages == current,
            });
        }

        buttons.push(PageButton::Next {
            target: self.has_next().then(|| current + 1),
        });

        buttons
    }
}
