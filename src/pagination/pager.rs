use serde::Serialize;

use super::{compute, page_bounds, total_pages, PageControls, DEFAULT_PAGE_SIZE, DEFAULT_RANGE};
use crate::posts::Post;

/// Owns the loaded posts and the page currently shown.
#[derive(Clone, Debug)]
pub struct Pager {
    posts: Vec<Post>,
    page_size: usize,
    range: usize,
    current_page: usize,
}

/// Borrowed snapshot of one page, handed to the renderers.
#[derive(Clone, Debug, Serialize)]
pub struct PageView<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub total_posts: usize,
    pub posts: &'a [Post],
    pub controls: PageControls,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PAGE_SIZE, DEFAULT_RANGE)
    }
}

impl Pager {
    pub fn new(posts: Vec<Post>, page_size: usize, range: usize) -> Self {
        Self {
            posts,
            page_size: page_size.max(1),
            range,
            current_page: 1,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn range(&self) -> usize {
        self.range
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.posts.len(), self.page_size)
    }

    /// Moves to page `n` if it exists. Returns false and leaves the
    /// current page untouched otherwise.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.total_pages() {
            log::debug!(
                "rejected navigation to page {n} (total pages {})",
                self.total_pages()
            );
            return false;
        }
        self.current_page = n;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(n) => self.go_to_page(n),
            None => false,
        }
    }

    pub fn page_slice(&self, n: usize) -> &[Post] {
        &self.posts[page_bounds(self.posts.len(), self.page_size, n)]
    }

    pub fn current_slice(&self) -> &[Post] {
        self.page_slice(self.current_page)
    }

    pub fn controls(&self) -> PageControls {
        compute(
            self.posts.len(),
            self.page_size,
            self.current_page,
            self.range,
        )
    }

    pub fn view(&self) -> PageView<'_> {
        PageView {
            page: self.current_page,
            total_pages: self.total_pages(),
            total_posts: self.posts.len(),
            posts: self.current_slice(),
            controls: self.controls(),
        }
    }
}
