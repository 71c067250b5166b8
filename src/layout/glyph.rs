//! Positioned glyph as handed over by a [`GlyphSource`](crate::source::GlyphSource).

/// A single rendered string with its position, size and font.
///
/// Coordinates are in PDF user space: `x` grows to the right and `y` grows
/// upward, so a new line further down the page has a *smaller* `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Left edge of the glyph
    pub x: f32,
    /// Baseline position
    pub y: f32,
    /// Rendered width
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Font identifier (resource name or base font)
    pub font_id: String,
    /// Rendered string content
    pub text: String,
}

impl Glyph {
    /// Create a new glyph.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftag::layout::Glyph;
    ///
    /// let g = Glyph::new(72.0, 700.0, 6.0, 12.0, "F1", "a");
    /// assert_eq!(g.right(), 78.0);
    /// ```
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        font_size: f32,
        font_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            font_size,
            font_id: font_id.into(),
            text: text.into(),
        }
    }

    /// Right edge of the glyph.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Split a multi-character run into one glyph per character.
    ///
    /// The run's width is spread evenly over its characters. Whitespace
    /// characters are not emitted; their share of the width is left as a gap,
    /// so word boundaries are recovered geometrically like any other.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdftag::layout::Glyph;
    ///
    /// let run = Glyph::new(0.0, 700.0, 30.0, 12.0, "F1", "ab cd");
    /// let chars = run.split_chars();
    /// assert_eq!(chars.len(), 4);
    /// assert_eq!(chars[2].x, 18.0);
    /// ```
    pub fn split_chars(&self) -> Vec<Glyph> {
        let count = self.text.chars().count();
        if count == 0 {
            return Vec::new();
        }
        let advance = self.width / count as f32;

        self.text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| Glyph {
                x: self.x + i as f32 * advance,
                y: self.y,
                width: advance,
                font_size: self.font_size,
                font_id: self.font_id.clone(),
                text: c.to_string(),
            })
            .collect()
    }

    /// Horizontal gap between the end of `prior` and the start of this glyph.
    ///
    /// Negative when the glyphs overlap.
    #[inline]
    pub fn gap_after(&self, prior: &Glyph) -> f32 {
        self.x - prior.right()
    }
}
