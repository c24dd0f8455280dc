//! rune-text: Unicode text algorithms for the rune workspace.
//!
//! - Property tables and data providers
//! - Bidirectional algorithm (UAX #9): paragraph resolution, reordering,
//!   level queries and mirroring
//! - Segmentation (UAX #29, UAX #14): grapheme clusters, words, sentences
//!   and line break opportunities

pub mod bidi;
pub mod error;
pub mod properties;
pub mod provider;
pub mod segmenter;
pub mod unicode;

pub use bidi::{
    base_left_to_right_level, base_right_to_left_level, is_left_to_right, is_right_to_left,
    reorder_visual, BaseDirection, BidiInfo, BidiResolver, Level, Paragraph, ParagraphDirection,
};
pub use error::DataError;
pub use properties::PropertyTables;
pub use provider::{CompiledDataProvider, DataProvider, TomlDataProvider};
pub use segmenter::{
    GraphemeClusterSegmenter, LineBreakKind, LineBreakOptions, LineBreakStrictness,
    LineBreakWordOption, LineSegmenter, SentenceSegmenter, WordBreakOptions, WordSegmenter,
    WordType,
};
pub use unicode::CodeUnits;
