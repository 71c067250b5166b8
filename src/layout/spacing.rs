//! Gap-median space detection.
//!
//! Content streams position every glyph absolutely and rarely paint explicit
//! space characters, so word boundaries have to be inferred from geometry.
//! Instead of one global threshold, each line gets its own expected
//! inter-character gap (the median gap of the line), which tolerates
//! proportional fonts and different point sizes on the same page:
//!
//! ```text
//! gap          = next.x - (prior.x + prior.width)
//! insert_space = gap > median_gap + prior.font_size * space_ratio
//!             || next.font_id != prior.font_id
//! ```
//!
//! A font change always starts a new token, even with a zero gap.

use super::{Glyph, LayoutConfig};
use crate::utils::safe_float_cmp;

/// Result of space detection between two adjacent glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceInsertion {
    /// Whether to insert a space before the next glyph
    pub insert: bool,
}

impl SpaceInsertion {
    /// Create a decision to insert a space.
    #[inline]
    pub const fn yes() -> Self {
        Self { insert: true }
    }

    /// Create a decision to not insert a space.
    #[inline]
    pub const fn no() -> Self {
        Self { insert: false }
    }
}

/// Expected inter-character gap of a line.
///
/// Takes the gap between every glyph and its predecessor (so `len - 1` gaps),
/// sorts them and returns the upper median `gaps[len / 2]`, clamped to zero.
/// Returns `0.0` for lines with fewer than two glyphs.
pub fn median_gap(line: &[Glyph]) -> f32 {
    if line.len() < 2 {
        return 0.0;
    }

    let mut gaps: Vec<f32> = line
        .windows(2)
        .map(|pair| pair[1].gap_after(&pair[0]))
        .collect();
    gaps.sort_by(|a, b| safe_float_cmp(*a, *b));

    gaps[gaps.len() / 2].max(0.0)
}

/// Determine if a space should be inserted between `prior` and `next`.
///
/// # Arguments
///
/// * `prior` - Glyph already emitted
/// * `next` - Glyph about to be emitted
/// * `median_gap` - The line's expected gap, see [`median_gap`]
/// * `config` - Layout configuration (provides `space_ratio`)
pub fn should_insert_space(
    prior: &Glyph,
    next: &Glyph,
    median_gap: f32,
    config: &LayoutConfig,
) -> SpaceInsertion {
    if next.font_id != prior.font_id {
        return SpaceInsertion::yes();
    }

    let threshold = median_gap + prior.font_size * config.space_ratio;
    if next.gap_after(prior) > threshold {
        SpaceInsertion::yes()
    } else {
        SpaceInsertion::no()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(x: f32, width: f32) -> Glyph {
        Glyph::new(x, 100.0, width, 10.0, "F1", "x")
    }

    #[test]
    fn test_median_of_gaps() {
        // gaps: 1, 0, 3 -> sorted 0, 1, 3 -> median 1
        let line = vec![glyph(0.0, 5.0), glyph(6.0, 5.0), glyph(11.0, 5.0), glyph(19.0, 5.0)];
        assert_eq!(median_gap(&line), 1.0);
    }

    #[test]
    fn test_median_uses_upper_middle_for_even_counts() {
        // gaps: 0, 4 -> sorted 0, 4 -> gaps[1] = 4
        let line = vec![glyph(0.0, 5.0), glyph(5.0, 5.0), glyph(14.0, 5.0)];
        assert_eq!(median_gap(&line), 4.0);
    }

    #[test]
    fn test_negative_median_is_clamped() {
        // Overlapping glyphs (kerning) produce negative gaps
        let line = vec![glyph(0.0, 5.0), glyph(4.0, 5.0), glyph(8.0, 5.0)];
        assert_eq!(median_gap(&line), 0.0);
    }

    #[test]
    fn test_short_lines_have_zero_median() {
        assert_eq!(median_gap(&[]), 0.0);
        assert_eq!(median_gap(&[glyph(0.0, 5.0)]), 0.0);
    }

    #[test]
    fn test_clear_word_gap() {
        let config = LayoutConfig::default();
        let prior = glyph(0.0, 5.0);
        let next = glyph(10.0, 5.0); // 5pt gap, threshold 0 + 10/5 = 2pt
        assert_eq!(should_insert_space(&prior, &next, 0.0, &config), SpaceInsertion::yes());
    }

    #[test]
    fn test_exactly_at_threshold() {
        let config = LayoutConfig::default();
        let prior = glyph(0.0, 5.0);

        // gap = threshold (1 + 2 = 3) -> no insert (must be strictly greater)
        let next = glyph(8.0, 5.0);
        assert_eq!(should_insert_space(&prior, &next, 1.0, &config), SpaceInsertion::no());

        let next = glyph(8.5, 5.0);
        assert_eq!(should_insert_space(&prior, &next, 1.0, &config), SpaceInsertion::yes());
    }

    #[test]
    fn test_font_change_forces_space() {
        let config = LayoutConfig::default();
        let prior = glyph(0.0, 5.0);
        let mut next = glyph(5.0, 5.0); // zero gap
        next.font_id = "F2".to_string();
        assert_eq!(should_insert_space(&prior, &next, 0.0, &config), SpaceInsertion::yes());
    }
}
