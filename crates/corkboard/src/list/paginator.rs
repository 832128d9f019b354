//! Pagination window computation and link rendering.

use thiserror::Error;

/// Pages at each end of the link block that are always shown, and the
/// radius of pages kept around the current one.
const LINK_WINDOW: i64 = 2;

/// Pagination configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// The page size must be positive.
    #[error("invalid page size: {0}")]
    InvalidPageSize(i64),
}

/// The pagination window for one list view: which slice of the total
/// result set the current page covers, and how to link to the others.
///
/// The current page is derived entirely from a requested skip offset,
/// clamped to the nearest valid page so stale bookmarked links keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total: i64,
    page_size: i64,
    skip: i64,
}

impl Paginator {
    /// Compute the window for `requested_skip` into `total` items.
    pub fn new(total: i64, page_size: i64, requested_skip: i64) -> Result<Self, PaginationError> {
        if page_size <= 0 {
            return Err(PaginationError::InvalidPageSize(page_size));
        }
        let total = total.max(0);

        let num_pages = (total as u64).div_ceil(page_size as u64) as i64;
        let last_page = (num_pages - 1).max(0);
        let page = (requested_skip.max(0) / page_size).min(last_page);

        Ok(Self {
            total,
            page_size,
            skip: page * page_size,
        })
    }

    /// Number of items skipped before this page.
    pub fn skip(&self) -> i64 {
        self.skip
    }

    /// Items per page.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Total matching items.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Index of the first item on this page.
    pub fn from_ix(&self) -> i64 {
        if self.total == 0 { 0 } else { self.skip }
    }

    /// One past the index of the last item on this page.
    pub fn to_ix(&self) -> i64 {
        (self.skip + self.page_size).min(self.total)
    }

    /// Total number of pages (0 when there are no items).
    pub fn num_pages(&self) -> i64 {
        (self.total as u64).div_ceil(self.page_size as u64) as i64
    }

    /// Zero-based index of the current page.
    pub fn current_page(&self) -> i64 {
        self.skip / self.page_size
    }

    /// The one-line "Displaying messages X-Y of N." notice.
    pub fn notice_html(&self) -> String {
        format!(
            "<p>Displaying messages {}-{} of {}.</p>",
            self.from_ix(),
            self.to_ix(),
            self.total
        )
    }

    /// Navigation links: prev/next plus a windowed page-number block.
    /// Empty when everything fits on one page. `query_pairs` (the current
    /// formatting options) are preserved in every link.
    pub fn links_html(&self, base_url: &str, query_pairs: &[(&str, &str)]) -> String {
        if self.num_pages() <= 1 {
            return String::new();
        }

        let current = self.current_page();
        let last = self.num_pages() - 1;
        let mut parts: Vec<String> = Vec::new();

        if current > 0 {
            parts.push(self.page_link(base_url, query_pairs, current - 1, "&laquo; prev"));
        }

        let mut previous_shown: Option<i64> = None;
        for page in 0..=last {
            let near_edge = page <= LINK_WINDOW - 1 || page >= last - (LINK_WINDOW - 1);
            let near_current = (page - current).abs() <= LINK_WINDOW;
            if !near_edge && !near_current {
                continue;
            }
            if previous_shown.is_some_and(|prev| page > prev + 1) {
                parts.push("&hellip;".to_string());
            }
            previous_shown = Some(page);

            if page == current {
                parts.push(format!("<span class='current-page'>{}</span>", page + 1));
            } else {
                parts.push(self.page_link(base_url, query_pairs, page, &(page + 1).to_string()));
            }
        }

        if current < last {
            parts.push(self.page_link(base_url, query_pairs, current + 1, "next &raquo;"));
        }

        parts.join("\n")
    }

    fn page_link(
        &self,
        base_url: &str,
        query_pairs: &[(&str, &str)],
        page: i64,
        label: &str,
    ) -> String {
        let mut query: Vec<String> = query_pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        query.push(format!("skip={}", page * self.page_size));
        format!("<a href='{}?{}'>{}</a>", base_url, query.join("&"), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_invalid() {
        assert_eq!(
            Paginator::new(10, 0, 0).unwrap_err(),
            PaginationError::InvalidPageSize(0)
        );
        assert!(Paginator::new(10, -5, 0).is_err());
    }

    #[test]
    fn window_bounds_hold_for_many_shapes() {
        for total in [0i64, 1, 9, 10, 11, 15, 25, 100] {
            for page_size in [1i64, 3, 10, 100] {
                for skip in [-10i64, 0, 5, 10, 99, 1000] {
                    let pag = Paginator::new(total, page_size, skip).unwrap();
                    assert!(pag.to_ix() - pag.from_ix() <= page_size);
                    assert!(pag.to_ix() <= total.max(0));
                    assert_eq!(pag.skip() % page_size, 0);
                }
            }
        }
    }

    #[test]
    fn requested_skip_lands_on_its_page() {
        let pag = Paginator::new(25, 10, 10).unwrap();
        assert_eq!(pag.current_page(), 1);
        assert_eq!(pag.from_ix(), 10);
        assert_eq!(pag.to_ix(), 20);
    }

    #[test]
    fn beyond_last_clamps_to_last_page() {
        let pag = Paginator::new(25, 10, 1000).unwrap();
        assert_eq!(pag.current_page(), 2);
        assert_eq!(pag.skip(), 20);
        assert_eq!(pag.to_ix(), 25);
    }

    #[test]
    fn negative_skip_clamps_to_first_page() {
        let pag = Paginator::new(25, 10, -30).unwrap();
        assert_eq!(pag.current_page(), 0);
        assert_eq!(pag.skip(), 0);
    }

    #[test]
    fn empty_set_produces_no_links() {
        let pag = Paginator::new(0, 10, 0).unwrap();
        assert_eq!(pag.from_ix(), 0);
        assert_eq!(pag.to_ix(), 0);
        assert_eq!(pag.num_pages(), 0);
        assert!(pag.links_html("/messList", &[]).is_empty());
    }

    #[test]
    fn single_page_produces_no_links() {
        let pag = Paginator::new(5, 10, 0).unwrap();
        assert!(pag.links_html("/messList", &[]).is_empty());
    }

    #[test]
    fn links_preserve_options_and_skip() {
        let pag = Paginator::new(35, 10, 10).unwrap();
        let html = pag.links_html("/messList", &[("x", "1"), ("headOnly", "1")]);
        assert!(html.contains("href='/messList?x=1&headOnly=1&skip=0'"));
        assert!(html.contains("href='/messList?x=1&headOnly=1&skip=20'"));
        assert!(html.contains("<span class='current-page'>2</span>"));
        assert!(html.contains("prev"));
        assert!(html.contains("next"));
    }

    #[test]
    fn long_page_runs_are_elided() {
        let pag = Paginator::new(1000, 10, 500).unwrap();
        let html = pag.links_html("/messList", &[]);
        assert!(html.contains("&hellip;"));
        // First, last and the pages around the current one are present.
        assert!(html.contains(">1<"));
        assert!(html.contains(">100<"));
        assert!(html.contains("<span class='current-page'>51</span>"));
    }

    #[test]
    fn notice_shows_window() {
        let pag = Paginator::new(15, 10, 0).unwrap();
        assert_eq!(
            pag.notice_html(),
            "<p>Displaying messages 0-10 of 15.</p>"
        );
    }
}
