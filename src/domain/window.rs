use std::ops::Range;

/// Indices of the articles materialized around `cursor`: previous, current
/// and next. Never more than three, clamped to the feed bounds.
pub fn render_window(cursor: usize, len: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let cursor = cursor.min(len - 1);
    cursor.saturating_sub(1)..(cursor + 2).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(render_window(5, 10), 4..7);
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(render_window(0, 10), 0..2);
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(render_window(9, 10), 8..10);
    }

    #[test]
    fn test_window_single_item() {
        assert_eq!(render_window(0, 1), 0..1);
    }

    #[test]
    fn test_window_empty_feed() {
        assert_eq!(render_window(0, 0), 0..0);
    }

    #[test]
    fn test_window_never_exceeds_three() {
        for len in 0..20 {
            for cursor in 0..len {
                let window = render_window(cursor, len);
                assert!(window.len() <= 3);
                assert!(window.contains(&cursor));
            }
        }
    }
}
