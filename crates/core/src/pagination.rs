//! Skip/top pagination helpers for the `/page/{skip}/{top}` routes.

/// Page size used when `top` is missing or unparseable.
pub const DEFAULT_TOP: i64 = 10;

/// Upper bound on a single page.
pub const MAX_TOP: i64 = 100;

/// Clamp a user-provided page size into `1..=MAX_TOP`, defaulting to [`DEFAULT_TOP`].
pub fn clamp_top(top: Option<i64>) -> i64 {
    top.unwrap_or(DEFAULT_TOP).clamp(1, MAX_TOP)
}

/// Clamp a user-provided skip to non-negative.
pub fn clamp_skip(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}

/// Parse a raw path segment, treating anything non-numeric as absent.
pub fn parse_segment(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Resolve raw `(skip, top)` path segments into clamped values.
pub fn resolve(skip: &str, top: &str) -> (i64, i64) {
    (
        clamp_skip(parse_segment(skip)),
        clamp_top(parse_segment(top)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_garbage() {
        assert_eq!(resolve("abc", "xyz"), (0, DEFAULT_TOP));
    }

    #[test]
    fn numeric_segments_pass_through() {
        assert_eq!(resolve("20", "5"), (20, 5));
    }

    #[test]
    fn top_is_bounded() {
        assert_eq!(clamp_top(Some(0)), 1);
        assert_eq!(clamp_top(Some(-3)), 1);
        assert_eq!(clamp_top(Some(10_000)), MAX_TOP);
    }

    #[test]
    fn negative_skip_becomes_zero() {
        assert_eq!(clamp_skip(Some(-1)), 0);
        assert_eq!(clamp_skip(None), 0);
    }
}
