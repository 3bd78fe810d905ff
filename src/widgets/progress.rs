//! Scroll-progress indicator.

/// Percentage of the page scrolled, in `[0, 100]`.
///
/// A page that fits the viewport has nothing to scroll and reports 0.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway() {
        assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 50.0);
    }

    #[test]
    fn bounds() {
        assert_eq!(scroll_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 2000.0, 1000.0), 100.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_progress(-40.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1100.0, 2000.0, 1000.0), 100.0);
    }

    #[test]
    fn page_that_fits_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(0.0, 1000.0, 1000.0), 0.0);
    }
}
