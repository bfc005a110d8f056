//! # Page Break Decisions
//!
//! A line of fields is never split: it either fits below the cursor or it
//! moves to the next page as a whole.

/// What to do with a line of fields at the current cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// Place the line on the current page (it fits).
    Place,
    /// Close this page and place the line at the top of the next one.
    MoveToNextPage,
    /// The page is already fresh and the line still does not fit. Place it
    /// anyway; breaking again would only produce an empty page.
    PlaceOversized,
}

const EPSILON: f64 = 0.001;

/// Given the space left above the bottom limit, decide where a line of
/// height `line_height` goes. `at_page_top` is true on a continuation page
/// nothing has been placed on yet.
pub fn decide_break(remaining_height: f64, line_height: f64, at_page_top: bool) -> BreakDecision {
    if line_height <= remaining_height + EPSILON {
        return BreakDecision::Place;
    }

    if at_page_top {
        return BreakDecision::PlaceOversized;
    }

    BreakDecision::MoveToNextPage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        assert_eq!(decide_break(100.0, 40.0, false), BreakDecision::Place);
    }

    #[test]
    fn test_exact_fit_is_placed() {
        assert_eq!(decide_break(40.0, 40.0, false), BreakDecision::Place);
    }

    #[test]
    fn test_overflow_moves_whole_line() {
        assert_eq!(decide_break(39.0, 40.0, false), BreakDecision::MoveToNextPage);
    }

    #[test]
    fn test_oversized_on_fresh_page_is_placed() {
        assert_eq!(decide_break(700.0, 900.0, true), BreakDecision::PlaceOversized);
    }
}
