#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeOption {
    pub value: u64,
    pub label: &'static str,
}

pub const PAGE_SIZE_OPTIONS: [PageSizeOption; 4] = [
    PageSizeOption {
        value: 10,
        label: "10",
    },
    PageSizeOption {
        value: 25,
        label: "25",
    },
    PageSizeOption {
        value: 50,
        label: "50",
    },
    PageSizeOption {
        value: 100,
        label: "100",
    },
];

pub const DEFAULT_PAGE_SIZE: PageSizeOption = PAGE_SIZE_OPTIONS[1];

impl PageSizeOption {
    pub fn for_value(value: u64) -> Option<Self> {
        PAGE_SIZE_OPTIONS.into_iter().find(|opt| opt.value == value)
    }

    /// Match a raw `length` parameter. Anything unparseable or outside the
    /// fixed set yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().and_then(Self::for_value)
    }
}

impl Default for PageSizeOption {
    fn default() -> Self {
        DEFAULT_PAGE_SIZE
    }
}

/// Page indicator, page size and last known row count for the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub page: u64,
    pub page_size: PageSizeOption,
    pub length: u64,
    pub total_count: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: PageSizeOption) -> Self {
        Self {
            page: 1,
            page_size,
            length: page_size.value,
            total_count: None,
        }
    }

    /// Zero-based offset of the first row on the current page. Saturates
    /// for page numbers no server could hold.
    pub fn start(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.length)
    }

    pub fn go_to_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Keeps the current page index even though the row window moves.
    pub fn change_page_size(&mut self, option: PageSizeOption) {
        self.page_size = option;
        self.length = option.value;
    }

    pub fn reset_to_first_page(&mut self) {
        self.page = 1;
    }

    pub fn set_total_count(&mut self, count: u64) {
        self.total_count = Some(count);
    }

    pub fn total_pages(&self) -> Option<u64> {
        let count = self.total_count?;
        if self.length == 0 {
            return Some(1);
        }
        Some(count.div_ceil(self.length).max(1))
    }

    /// 1-based index of the first row shown, 0 when there are no rows.
    pub fn first_content(&self) -> u64 {
        match self.total_count {
            Some(0) => 0,
            _ => self.start().saturating_add(1),
        }
    }

    pub fn last_content(&self, rows_on_page: usize) -> u64 {
        self.start().saturating_add(rows_on_page as u64)
    }

    pub fn next_page(&self) -> Option<u64> {
        let next = self.page.checked_add(1)?;
        match self.total_pages() {
            Some(total) if next > total => None,
            _ => Some(next),
        }
    }

    pub fn prev_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_fixed_sizes() {
        assert_eq!(PageSizeOption::parse("50").map(|o| o.value), Some(50));
        assert_eq!(PageSizeOption::parse("37"), None);
        assert_eq!(PageSizeOption::parse("abc"), None);
        assert_eq!(PageSizeOption::parse(""), None);
    }

    #[test]
    fn start_follows_page_and_length() {
        let mut p = Pagination::default();
        assert_eq!(p.start(), 0);
        p.go_to_page(3);
        assert_eq!(p.start(), 50);
        p.go_to_page(0);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn change_page_size_keeps_page_index() {
        let mut p = Pagination::default();
        p.go_to_page(4);
        p.change_page_size(PageSizeOption::for_value(50).expect("known size"));
        assert_eq!(p.page, 4);
        assert_eq!(p.length, 50);
        assert_eq!(p.start(), 150);
    }

    #[test]
    fn page_bounds_come_from_total_count() {
        let mut p = Pagination::default();
        assert_eq!(p.next_page(), Some(2));
        p.set_total_count(60);
        assert_eq!(p.total_pages(), Some(3));
        p.go_to_page(3);
        assert_eq!(p.next_page(), None);
        assert_eq!(p.prev_page(), Some(2));
        assert_eq!(p.first_content(), 51);
        assert_eq!(p.last_content(10), 60);

        p.set_total_count(0);
        assert_eq!(p.total_pages(), Some(1));
        assert_eq!(p.first_content(), 0);
    }

    #[test]
    fn huge_page_without_count_saturates() {
        let mut p = Pagination::default();
        p.go_to_page(u64::MAX);
        assert_eq!(p.start(), u64::MAX);
        assert_eq!(p.first_content(), u64::MAX);
        assert_eq!(p.last_content(25), u64::MAX);
        assert_eq!(p.next_page(), None);
        assert_eq!(p.prev_page(), Some(u64::MAX - 1));
    }
}
