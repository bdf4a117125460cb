//! Page-number windows for list navigation.
//!
//! The window always shows the first and last page plus every page within
//! [`NEIGHBOR_DISTANCE`] of the current one. A hole of exactly one page is
//! filled with that page; larger holes collapse into a single [`PageToken::Gap`].

use std::fmt;

pub const NEIGHBOR_DISTANCE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Gap,
}

impl PageToken {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageToken::Page(n) => Some(*n),
            PageToken::Gap => None,
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(n) => write!(f, "{}", n),
            PageToken::Gap => write!(f, "…"),
        }
    }
}

pub fn visible_pages(current: u32, total: u32) -> Vec<PageToken> {
    visible_pages_with(current, total, NEIGHBOR_DISTANCE)
}

pub fn visible_pages_with(current: u32, total: u32, delta: u32) -> Vec<PageToken> {
    let low = current.saturating_sub(delta);
    let high = current.saturating_add(delta);
    let shown = (1..=total).filter(|&i| i == 1 || i == total || (low..=high).contains(&i));

    let mut tokens = Vec::new();
    let mut last: Option<u32> = None;
    for page in shown {
        if let Some(prev) = last {
            match page - prev {
                1 => {}
                2 => tokens.push(PageToken::Page(prev + 1)),
                _ => tokens.push(PageToken::Gap),
            }
        }
        tokens.push(PageToken::Page(page));
        last = Some(page);
    }
    tokens
}

/// Pagination control state: current page, page count and the page-change
/// affordances derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }

    pub fn tokens(&self) -> Vec<PageToken> {
        visible_pages(self.current, self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    /// Page to switch to when a token is clicked; gaps are inert.
    pub fn select(&self, token: PageToken) -> Option<u32> {
        token.page()
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self.tokens();
        let mut parts = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token {
                PageToken::Page(n) if n == self.current => parts.push(format!("[{}]", n)),
                other => parts.push(other.to_string()),
            }
        }
        let prev = if self.has_previous() { "<" } else { " " };
        let next = if self.has_next() { ">" } else { " " };
        write!(f, "{} {} {}", prev, parts.join(" "), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageToken::{Gap, Page};

    #[test]
    fn single_hidden_page_is_revealed_before_the_window() {
        assert_eq!(
            visible_pages(5, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7), Gap, Page(10)]
        );
    }

    #[test]
    fn middle_page_has_gaps_on_both_sides() {
        assert_eq!(
            visible_pages(6, 12),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(12)]
        );
    }

    #[test]
    fn small_range_shows_everything() {
        assert_eq!(
            visible_pages(1, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(visible_pages(3, 5), visible_pages(1, 5));
    }

    #[test]
    fn single_hidden_page_is_revealed() {
        // 1 is shown, window is 2..=6 at current 4 -> nothing hidden
        // at current 5 window is 3..=7, page 2 is the only hole
        assert_eq!(
            visible_pages(5, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn boundaries_collapse_one_side() {
        assert_eq!(
            visible_pages(1, 10),
            vec![Page(1), Page(2), Page(3), Gap, Page(10)]
        );
        assert_eq!(
            visible_pages(10, 10),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn empty_and_single_page() {
        assert!(visible_pages(1, 0).is_empty());
        assert_eq!(visible_pages(1, 1), vec![Page(1)]);
    }

    #[test]
    fn first_and_last_appear_exactly_once() {
        for total in 1..=30 {
            for current in 1..=total {
                let tokens = visible_pages(current, total);
                let firsts = tokens.iter().filter(|t| **t == Page(1)).count();
                let lasts = tokens.iter().filter(|t| **t == Page(total)).count();
                assert_eq!(firsts, 1, "page 1 at current={} total={}", current, total);
                assert_eq!(lasts, 1, "page {} at current={}", total, current);

                // no gap ever hides exactly one page
                let pages: Vec<u32> = tokens.iter().filter_map(|t| t.page()).collect();
                for (i, token) in tokens.iter().enumerate() {
                    if *token == Gap {
                        let before = tokens[i - 1].page().unwrap();
                        let after = tokens[i + 1].page().unwrap();
                        assert!(after - before > 2);
                    }
                }
                assert!(pages.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn gap_tokens_are_inert() {
        let control = Pagination::new(5, 10);
        assert_eq!(control.select(Gap), None);
        assert_eq!(control.select(Page(7)), Some(7));
    }

    #[test]
    fn previous_and_next_disabled_at_bounds() {
        let first = Pagination::new(1, 3);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(3, 3);
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(2));
    }

    #[test]
    fn renders_current_page_highlighted() {
        assert_eq!(Pagination::new(1, 3).to_string(), "  [1] 2 3 >");
        assert_eq!(
            Pagination::new(5, 10).to_string(),
            "< 1 2 3 4 [5] 6 7 … 10 >"
        );
    }
}
