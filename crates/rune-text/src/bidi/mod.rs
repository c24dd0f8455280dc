//! Bidirectional (BiDi) text support: the Unicode Bidirectional Algorithm
//! (UAX #9).
//!
//! - [`BidiResolver`] splits text into paragraphs and resolves one level per
//!   code point (P1 through I2).
//! - [`Paragraph`] applies the line rules (L1, L2) to produce visual maps
//!   and runs; [`BidiInfo::reorder_line_str`] also mirrors (L4).
//! - [`reorder_visual`] reorders any level array, resolved or not.

mod explicit;
mod implicit;
pub mod level;
pub mod levels;
pub mod mirror;
pub mod reorder;
mod sequences;

pub use level::{
    base_left_to_right_level, base_right_to_left_level, is_left_to_right, is_right_to_left,
    BaseDirection, Level, MAX_DEPTH,
};
pub use levels::{BidiInfo, BidiResolver, Paragraph, ParagraphDirection};
pub use mirror::mirrored;
pub use reorder::{reorder_visual, BidiRun};
