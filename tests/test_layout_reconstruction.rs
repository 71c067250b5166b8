//! Layout reconstruction and page filtering on synthetic glyph streams.

use pdftag::layout::{keep_page, LayoutConfig, LayoutReconstructor, SingleGlyphLines};
use pdftag::Glyph;
use proptest::prelude::*;

const WIDTH: f32 = 5.0;
const SIZE: f32 = 10.0;

/// Place `words` on one baseline with the given gaps: `intra[i]` follows the
/// i-th glyph inside a word, `inter[j]` follows the j-th word.
fn layout_line(words: &[String], intra: &[f32], inter: &[f32], y: f32) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    let mut x = 0.0;
    let mut intra_iter = intra.iter().cycle();
    for (w, word) in words.iter().enumerate() {
        let chars: Vec<char> = word.chars().collect();
        for (c, ch) in chars.iter().enumerate() {
            glyphs.push(Glyph::new(x, y, WIDTH, SIZE, "F1", ch.to_string()));
            x += WIDTH;
            if c + 1 < chars.len() {
                x += intra_iter.next().copied().unwrap_or(0.0);
            }
        }
        x += inter[w % inter.len()];
    }
    glyphs
}

proptest! {
    /// Uniform line: every word gap becomes one space, no glyph gap does.
    #[test]
    fn prop_single_line_spacing(
        words in prop::collection::vec("[a-z]{2,6}", 1..8),
        intra in prop::collection::vec(0.0f32..1.5, 1..16),
        inter in prop::collection::vec(4.0f32..20.0, 1..8),
    ) {
        let glyphs = layout_line(&words, &intra, &inter, 700.0);
        let page = LayoutReconstructor::new().reconstruct(&glyphs);

        prop_assert_eq!(page.lines.len(), 1);
        prop_assert_eq!(page.text(), words.join(" "));
    }

    /// Every baseline drop larger than a fifth of the font size starts a line.
    #[test]
    fn prop_lines_follow_baselines(
        lines in prop::collection::vec(prop::collection::vec("[a-z]{2,6}", 1..5), 1..6),
        leading in 3.0f32..30.0,
    ) {
        let mut glyphs = Vec::new();
        for (i, words) in lines.iter().enumerate() {
            glyphs.extend(layout_line(words, &[1.0], &[6.0], 700.0 - leading * i as f32));
        }
        let page = LayoutReconstructor::new().reconstruct(&glyphs);

        let expected: Vec<String> = lines.iter().map(|words| words.join(" ")).collect();
        prop_assert_eq!(page.text(), expected.join("\n"));
    }

    /// The reference settings never emit the last line of a page.
    #[test]
    fn prop_reference_drops_last_line(
        lines in prop::collection::vec(prop::collection::vec("[a-z]{2,6}", 1..5), 1..6),
    ) {
        let mut glyphs = Vec::new();
        for (i, words) in lines.iter().enumerate() {
            glyphs.extend(layout_line(words, &[1.0], &[6.0], 700.0 - 14.0 * i as f32));
        }
        let page = LayoutReconstructor::with_config(LayoutConfig::reference()).reconstruct(&glyphs);
        prop_assert_eq!(page.lines.len(), lines.len() - 1);
    }
}

#[test]
fn test_single_glyph_line_is_dropped() {
    let mut glyphs = layout_line(&["total".to_string()], &[1.0], &[6.0], 700.0);
    glyphs.push(Glyph::new(0.0, 686.0, WIDTH, SIZE, "F1", "$"));
    glyphs.extend(layout_line(&["due".to_string()], &[1.0], &[6.0], 672.0));

    let page = LayoutReconstructor::new().reconstruct(&glyphs);
    assert_eq!(page.text(), "total\ndue");
}

#[test]
fn test_single_glyph_line_can_be_kept() {
    let mut glyphs = layout_line(&["total".to_string()], &[1.0], &[6.0], 700.0);
    glyphs.push(Glyph::new(0.0, 686.0, WIDTH, SIZE, "F1", "$"));
    glyphs.extend(layout_line(&["due".to_string()], &[1.0], &[6.0], 672.0));

    let config = LayoutConfig::default().with_single_glyph_lines(SingleGlyphLines::Keep);
    let page = LayoutReconstructor::with_config(config).reconstruct(&glyphs);
    assert_eq!(page.text(), "total\n$\ndue");
}

#[test]
fn test_font_change_splits_words() {
    let mut glyphs = layout_line(&["Acme".to_string()], &[1.0], &[0.0], 700.0);
    let x = glyphs.last().map_or(0.0, |g| g.right() + 1.0);
    glyphs.push(Glyph::new(x, 700.0, WIDTH, SIZE, "F2-Bold", "X"));
    glyphs.push(Glyph::new(x + 6.0, 700.0, WIDTH, SIZE, "F2-Bold", "Y"));

    let page = LayoutReconstructor::new().reconstruct(&glyphs);
    assert_eq!(page.text(), "Acme XY");
}

#[test]
fn test_rising_baseline_continues_line() {
    // superscripts and column jumps upward never break a line
    let glyphs = vec![
        Glyph::new(0.0, 700.0, WIDTH, SIZE, "F1", "a"),
        Glyph::new(6.0, 700.0, WIDTH, SIZE, "F1", "b"),
        Glyph::new(12.0, 704.0, WIDTH, SIZE, "F1", "2"),
    ];
    let page = LayoutReconstructor::new().reconstruct(&glyphs);
    assert_eq!(page.lines.len(), 1);
}

#[test]
fn test_page_filter_majority() {
    assert!(keep_page("Statement of account"));
    // exactly half is not enough
    assert!(!keep_page("ok ## fine $$"));
    assert!(keep_page("ok ## fine"));
    assert!(!keep_page(""));
}
