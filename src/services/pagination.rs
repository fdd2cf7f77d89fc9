//! Page requests and paged results for list operations

/// Page size used when the caller gives none or an invalid one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// A normalized request for one page of results (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Clamp raw input into a valid request
    ///
    /// Page numbers below 1 become 1, sizes below 1 become the default and
    /// sizes above the maximum are capped.
    pub fn normalize(page_number: i64, page_size: i64) -> Self {
        let page_number = page_number.clamp(1, u32::MAX as i64) as u32;
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE as i64) as u32
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items before this page
    pub fn offset(&self) -> usize {
        (self.page_number as usize - 1).saturating_mul(self.page_size as usize)
    }

    /// Cut this page out of a full, already ordered list
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total_count = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();

        Page {
            items,
            page_number: self.page_number,
            page_size: self.page_size,
            total_count,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalize(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// One page of a larger result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size as usize)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        (self.page_number as usize) < self.total_pages()
    }

    /// Transform the items while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(PageRequest::normalize(0, 0), PageRequest::normalize(1, 10));
        assert_eq!(PageRequest::normalize(-3, -1).page_number(), 1);
        assert_eq!(PageRequest::normalize(2, 0).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::normalize(2, 51).page_size(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::normalize(2, 50).page_size(), 50);
        assert_eq!(PageRequest::normalize(3, 7).offset(), 14);
    }

    #[test]
    fn test_apply() {
        let items: Vec<u32> = (1..=23).collect();
        let page = PageRequest::normalize(3, 10).apply(items);

        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total_count, 23);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_first_page() {
        let page = PageRequest::default().apply((1..=23).collect::<Vec<u32>>());
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = PageRequest::normalize(9, 10).apply(vec![1, 2, 3]);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_empty_source() {
        let page = PageRequest::default().apply(Vec::<u32>::new());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next_page());
        assert!(!page.has_previous_page());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = PageRequest::normalize(2, 2).apply(vec![1, 2, 3, 4, 5]);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![30, 40]);
        assert_eq!(mapped.page_number, 2);
        assert_eq!(mapped.total_count, 5);
    }
}
