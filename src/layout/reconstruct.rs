//! Line and word reconstruction from a page's glyph stream.
//!
//! Glyphs arrive in paint order. A line ends when the next glyph drops below
//! the previous one by more than a fraction of the previous font size; the
//! completed line is then segmented into words with the gap-median rule from
//! [`spacing`](super::spacing).

use super::spacing::{median_gap, should_insert_space};
use super::Glyph;

/// What to do with a completed line that holds exactly one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleGlyphLines {
    /// Skip the line entirely (reference behavior; keyword rules were tuned
    /// against this output)
    #[default]
    Drop,
    /// Emit the glyph as a one-word line
    Keep,
}

/// Configuration for layout reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// A line break is detected when the baseline drops by more than
    /// `line_break_ratio * previous font size`.
    ///
    /// Default: 0.2
    pub line_break_ratio: f32,

    /// A space is inserted when the gap exceeds the line's median gap by more
    /// than `space_ratio * prior font size`.
    ///
    /// Default: 0.2
    pub space_ratio: f32,

    /// Handling of one-glyph lines.
    pub single_glyph_lines: SingleGlyphLines,

    /// Emit the glyphs after the last detected line break as a final line.
    ///
    /// The reference reconstruction never flushed this run and lost the last
    /// line of every page. Default: true
    pub flush_final_line: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_break_ratio: 0.2,
            space_ratio: 0.2,
            single_glyph_lines: SingleGlyphLines::Drop,
            flush_final_line: true,
        }
    }
}

impl LayoutConfig {
    /// Exact reference behavior: single-glyph lines dropped and the final
    /// line of each page discarded.
    pub fn reference() -> Self {
        Self {
            flush_final_line: false,
            ..Self::default()
        }
    }

    /// Set single-glyph line handling.
    pub fn with_single_glyph_lines(mut self, handling: SingleGlyphLines) -> Self {
        self.single_glyph_lines = handling;
        self
    }

    /// Enable or disable flushing of the final line.
    pub fn with_flush_final_line(mut self, flush: bool) -> Self {
        self.flush_final_line = flush;
        self
    }
}

/// One reconstructed line: word tokens in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Word tokens, separated by inferred whitespace
    pub words: Vec<String>,
}

impl Line {
    /// Render the line with single spaces between words.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Text of one page, segmented into lines and words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructedPage {
    /// Lines in paint order
    pub lines: Vec<Line>,
}

impl ReconstructedPage {
    /// Render the page: words joined by `' '`, lines joined by `'\n'`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True if no line was produced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Converts a page's glyph stream into lines of words.
#[derive(Debug, Clone, Default)]
pub struct LayoutReconstructor {
    config: LayoutConfig,
}

impl LayoutReconstructor {
    /// Create a reconstructor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Reconstruct one page.
    ///
    /// # Algorithm
    ///
    /// 1. The first glyph establishes the baseline.
    /// 2. For every following glyph, a drop of the baseline greater than
    ///    `line_break_ratio * prev.font_size` closes the line that started at
    ///    the previous boundary.
    /// 3. Each closed line is segmented with [`should_insert_space`] against
    ///    the line's [`median_gap`].
    /// 4. The run after the last boundary is emitted only when
    ///    `flush_final_line` is set.
    pub fn reconstruct(&self, glyphs: &[Glyph]) -> ReconstructedPage {
        let mut page = ReconstructedPage::default();
        let mut first = 0;

        for idx in 1..glyphs.len() {
            if self.is_line_break(&glyphs[idx - 1], &glyphs[idx]) {
                self.complete_line(&glyphs[first..idx], &mut page);
                first = idx;
            }
        }

        if self.config.flush_final_line && first < glyphs.len() {
            self.complete_line(&glyphs[first..], &mut page);
        }

        page
    }

    fn is_line_break(&self, prev: &Glyph, cur: &Glyph) -> bool {
        let drop = prev.y - cur.y;
        drop > prev.font_size * self.config.line_break_ratio
    }

    fn complete_line(&self, line: &[Glyph], page: &mut ReconstructedPage) {
        match line {
            [] => {},
            [only] => {
                if self.config.single_glyph_lines == SingleGlyphLines::Keep {
                    page.lines.push(Line {
                        words: vec![only.text.clone()],
                    });
                }
            },
            [head, rest @ ..] => {
                let median = median_gap(line);
                log::trace!(
                    "line {}: {} glyphs, median gap {:.1}",
                    page.lines.len(),
                    line.len(),
                    median
                );

                let mut words = Vec::new();
                let mut current = head.text.clone();
                let mut prior = head;
                for glyph in rest {
                    if should_insert_space(prior, glyph, median, &self.config).insert {
                        words.push(std::mem::take(&mut current));
                    }
                    current.push_str(&glyph.text);
                    prior = glyph;
                }
                words.push(current);

                page.lines.push(Line { words });
            },
        }
    }
}
