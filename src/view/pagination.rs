//! Page tracking and the windowed page selector.

use thiserror::Error;

/// A page transition outside `1..=total` was requested.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Page {requested} is out of range 1..={total}")]
pub struct PageOutOfRange {
    pub requested: u32,
    pub total: u32,
}

/// How many page buttons to show behind and ahead of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub behind: u32,
    pub ahead: u32,
}

impl PageSpan {
    pub const fn new(behind: u32, ahead: u32) -> Self {
        Self { behind, ahead }
    }

    /// Shows every page.
    pub const UNBOUNDED: PageSpan = PageSpan::new(u32::MAX, u32::MAX);
}

impl Default for PageSpan {
    fn default() -> Self {
        PageSpan::new(5, 4)
    }
}

/// Page numbers in `[max(1, current - behind), min(total, current + ahead)]`.
pub fn windowed_pages(current: u32, total: u32, behind: u32, ahead: u32) -> Vec<u32> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let first = current.saturating_sub(behind).max(1);
    let last = current.saturating_add(ahead).min(total);
    (first..=last).collect()
}

/// Render-ready page selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub current: u32,
    pub total: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Current page and total page count for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total: u32,
    span: PageSpan,
}

impl Pagination {
    /// Starts at page 1 of 1 until a fetch reports the real total.
    pub fn new(span: PageSpan) -> Self {
        Self {
            current: 1,
            total: 1,
            span,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Move to `page`. Returns whether the current page changed.
    pub fn go_to(&mut self, page: u32) -> Result<bool, PageOutOfRange> {
        if page < 1 || page > self.total {
            return Err(PageOutOfRange {
                requested: page,
                total: self.total,
            });
        }
        let changed = page != self.current;
        self.current = page;
        Ok(changed)
    }

    /// Advance one page; `None` at the last page.
    pub fn next(&mut self) -> Option<u32> {
        if !self.has_next() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    /// Go back one page; `None` at the first page.
    pub fn previous(&mut self) -> Option<u32> {
        if !self.has_previous() {
            return None;
        }
        self.current -= 1;
        Some(self.current)
    }

    /// Record the total reported by a fetched page.
    pub fn set_total(&mut self, total: u32) {
        self.total = total.max(1);
        self.current = self.current.min(self.total);
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            pages: windowed_pages(self.current, self.total, self.span.behind, self.span.ahead),
            current: self.current,
            total: self.total,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_clamped_to_bounds() {
        assert_eq!(windowed_pages(1, 3, 5, 4), vec![1, 2, 3]);
        assert_eq!(windowed_pages(10, 42, 5, 4), (5..=14).collect::<Vec<_>>());
        assert_eq!(windowed_pages(42, 42, 5, 4), (37..=42).collect::<Vec<_>>());
        assert_eq!(windowed_pages(3, 7, u32::MAX, u32::MAX), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_always_contains_current() {
        for total in 1..=12 {
            for current in 1..=total {
                for (behind, ahead) in [(0, 0), (5, 4), (1, 1)] {
                    assert!(windowed_pages(current, total, behind, ahead).contains(&current));
                }
            }
        }
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut p = Pagination::new(PageSpan::default());
        p.set_total(3);

        assert_eq!(p.go_to(0), Err(PageOutOfRange { requested: 0, total: 3 }));
        assert_eq!(p.go_to(4), Err(PageOutOfRange { requested: 4, total: 3 }));
        assert_eq!(p.current(), 1);

        assert_eq!(p.go_to(3), Ok(true));
        assert_eq!(p.go_to(3), Ok(false));
        assert_eq!(p.current(), 3);
    }

    #[test]
    fn test_next_previous_guarded_at_boundaries() {
        let mut p = Pagination::new(PageSpan::default());
        assert_eq!(p.previous(), None);
        assert_eq!(p.next(), None);

        p.set_total(2);
        let w = p.window();
        assert!(!w.has_previous);
        assert!(w.has_next);

        assert_eq!(p.next(), Some(2));
        assert_eq!(p.next(), None);
        assert!(!p.window().has_next);
        assert_eq!(p.previous(), Some(1));
    }

    #[test]
    fn test_set_total_keeps_current_in_range() {
        let mut p = Pagination::new(PageSpan::default());
        p.set_total(10);
        p.go_to(9).unwrap();
        p.set_total(0);
        assert_eq!(p.total(), 1);
        assert_eq!(p.current(), 1);
    }
}
