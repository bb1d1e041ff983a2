pub mod pager;

use std::ops::Range;

use serde::Serialize;

pub use pager::{PageView, Pager};

pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_RANGE: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageEntry {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub entries: Vec<PageEntry>,
}

impl PageControls {
    fn none(total_pages: usize) -> Self {
        Self {
            current_page: 1,
            total_pages,
            prev_disabled: true,
            next_disabled: true,
            entries: Vec::new(),
        }
    }

    /// True when there is at most one page and nothing should be drawn.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn previous_target(&self) -> Option<usize> {
        if self.prev_disabled {
            None
        } else {
            Some(self.current_page - 1)
        }
    }

    pub fn next_target(&self) -> Option<usize> {
        if self.next_disabled {
            None
        } else {
            Some(self.current_page + 1)
        }
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                PageEntry::Page { number, .. } => Some(*number),
                PageEntry::Ellipsis => None,
            })
            .collect()
    }
}

/// `ceil(total_items / page_size)`; a zero page size counts as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Half-open index range of `page` (1-based) within the item list.
/// Pages outside `1..=total_pages` yield an empty range.
pub fn page_bounds(total_items: usize, page_size: usize, page: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    if page == 0 || page > total_pages(total_items, page_size) {
        return 0..0;
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    start..end
}

/// Builds the numbered page controls around `current_page`.
///
/// The window is `range` pages either side of the current page. Near either
/// end it is widened to `2 * range + 1` pages; both widening checks look at
/// the requested page, so on short page counts they can both fire. Page 1
/// and the last page
/// are always pinned, with an ellipsis when there is a gap to the window.
///
/// A `current_page` outside `1..=total_pages` is clamped.
pub fn compute(
    total_items: usize,
    page_size: usize,
    current_page: usize,
    range: usize,
) -> PageControls {
    let total = total_pages(total_items, page_size);
    if total <= 1 {
        return PageControls::none(total);
    }
    let current = current_page.clamp(1, total);

    let mut start_page = current.saturating_sub(range).max(1);
    let mut end_page = current.saturating_add(range).min(total);
    let full_width = range.saturating_mul(2).saturating_add(1);

    if current <= range.saturating_add(1) {
        end_page = full_width.min(total);
    }
    if current >= total.saturating_sub(range) {
        start_page = total.saturating_sub(range.saturating_mul(2)).max(1);
    }

    let mut entries = Vec::with_capacity(end_page - start_page + 5);

    if start_page > 1 {
        entries.push(PageEntry::Page {
            number: 1,
            active: false,
        });
        if start_page > 2 {
            entries.push(PageEntry::Ellipsis);
        }
    }

    for number in start_page..=end_page {
        entries.push(PageEntry::Page {
            number,
            active: number == current,
        });
    }

    if end_page < total {
        if end_page < total - 1 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page {
            number: total,
            active: false,
        });
    }

    PageControls {
        current_page: current,
        total_pages: total,
        prev_disabled: current == 1,
        next_disabled: current == total,
        entries,
    }
}
