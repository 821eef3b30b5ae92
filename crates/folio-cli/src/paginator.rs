/// Cursor over a fixed item list, one page at a time.
///
/// Page indexes are 1-based. Moving past either end is a no-op, so
/// callers can advance blindly.
pub struct Paginator<T> {
    items: Vec<T>,
    items_per_page: usize,
    page_index: usize,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, items_per_page: usize) -> Self {
        Self {
            items,
            items_per_page: items_per_page.max(1),
            page_index: 1,
        }
    }

    /// The items on the current page.
    pub fn items(&self) -> &[T] {
        let start = (self.page_index - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.items.len());
        if start >= self.items.len() {
            return &[];
        }
        &self.items[start..end]
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    /// Advances to the next page. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if self.page_index >= self.total_pages() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Goes back one page. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if self.page_index <= 1 {
            return false;
        }
        self.page_index -= 1;
        true
    }
}
