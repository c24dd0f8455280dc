//! Code unit decoding shared by the bidi resolver and the segmenters.
//!
//! Every entry point accepts UTF-8 (`&str` or possibly ill-formed `&[u8]`)
//! and possibly ill-formed UTF-16 (`&[u16]`); the [`CodeUnits`] trait gives
//! them one view as `(offset, char)` pairs.

mod code_points;

pub use code_points::{CodeUnits, Utf8CodePoints, Utf16CodePoints};
