//! Layout reconstruction: positioned glyphs to lines and words.
//!
//! ```text
//! Glyph[] (one page, paint order)
//!     ↓
//! [LayoutReconstructor] (baseline drops → lines, gap median → words)
//!     ↓
//! ReconstructedPage
//!     ↓
//! [keep_page] (noise rejection)
//! ```

pub mod glyph;
pub mod page_filter;
pub mod reconstruct;
pub mod spacing;

pub use glyph::Glyph;
pub use page_filter::{keep_page, TokenCounts};
pub use reconstruct::{LayoutConfig, LayoutReconstructor, Line, ReconstructedPage, SingleGlyphLines};
pub use spacing::{median_gap, should_insert_space, SpaceInsertion};
