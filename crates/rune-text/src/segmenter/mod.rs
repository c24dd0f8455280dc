//! Text segmentation: grapheme clusters, words and sentences (UAX #29) and
//! line break opportunities (UAX #14).
//!
//! Every segmenter hands out a forward-only iterator of code unit offsets.
//! The first item is always 0 and the last is the text length; empty text
//! yields just `0`. Once exhausted, an iterator keeps returning `None`.

mod grapheme;
mod line;
mod lookahead;
mod sentence;
mod word;

pub use grapheme::{GraphemeClusterBreakIterator, GraphemeClusterSegmenter};
pub use line::{
    LineBreakIterator, LineBreakKind, LineBreakOptions, LineBreakStrictness, LineBreakWordOption,
    LineSegmenter,
};
pub use sentence::{SentenceBreakIterator, SentenceSegmenter};
pub use word::{WordBreakIterator, WordBreakOptions, WordSegmenter, WordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Start,
    Running,
    Done,
}
