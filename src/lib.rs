//! # pdftag
//!
//! Batch text recovery, date detection and keyword-based renaming for scanned
//! and downloaded PDF statements.
//!
//! ## Core Features
//!
//! - **Layout reconstruction**: positioned glyphs are grouped into lines and
//!   words using baseline drops and the median inter-glyph gap of each line
//! - **Noise filtering**: pages dominated by symbol soup from broken font
//!   encodings are dropped
//! - **Date normalization**: the first date in a document (`Mar 3, 2021`,
//!   `03/03/21`, ...) becomes a filename suffix `-2021-Mar-3`
//! - **Classification**: an ordered JSON rule table maps keyword sets to
//!   canonical names; collisions get `-1`, `-2`, ... suffixes
//! - **Batch pipeline**: bounded worker pool, per-document failure isolation,
//!   `tags.json` and `words.json` reports
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdftag::{Coordinator, NameRegistry, PipelineConfig, RuleTable};
//! # #[cfg(feature = "pdf")]
//! use pdftag::source::PdfOxideSource;
//!
//! # #[cfg(feature = "pdf")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::new("scans", "sorted").with_write_text(true);
//! let rules = RuleTable::load("rules.json")?;
//! let registry = NameRegistry::seed_from_dir(&config.output_dir, "pdf")?;
//!
//! let report = Coordinator::new(config, rules, registry, PdfOxideSource::new()).run()?;
//! println!("renamed {} of {} documents", report.renamed, report.discovered);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "pdf"))]
//! # fn main() {}
//! ```
//!
//! ## Architecture
//!
//! - [`source`]: decoding is delegated to a [`source::GlyphSource`]
//! - [`layout`]: line and word reconstruction, page filtering
//! - [`text`]: document assembly, dates and word statistics
//! - [`classify`]: rule table, name registry and renaming
//! - [`pipeline`]: coordinator, processing units and reports

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Glyph decoding seam
pub mod source;

// Layout reconstruction
pub mod layout;

// Document text, dates and words
pub mod text;

// Rules and renaming
pub mod classify;

// Batch pipeline
pub mod pipeline;

// Re-exports
pub use classify::{NameRegistry, Rule, RuleTable};
pub use config::{PipelineConfig, TagPolicy};
pub use error::{Error, Result};
pub use layout::{Glyph, LayoutConfig, LayoutReconstructor};
pub use pipeline::{Coordinator, RunReport, TagRecord};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats for sorting, treating NaN as equal to itself and
    /// greater than every number.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }

        #[test]
        fn test_sorting_gaps_with_nan() {
            let mut gaps = vec![3.0, f32::NAN, -1.0, 2.0];
            gaps.sort_by(|a, b| safe_float_cmp(*a, *b));
            assert_eq!(&gaps[..3], &[-1.0, 2.0, 3.0]);
            assert!(gaps[3].is_nan());
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
