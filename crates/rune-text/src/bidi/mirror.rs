//! Character mirroring for right-to-left runs (rule L4).

use crate::properties::PropertyTables;

/// Return the `Bidi_Mirroring_Glyph` of `ch` when it is displayed at
/// `level`, or `ch` itself.
///
/// Only characters at right-to-left levels are mirrored.
pub fn mirror_for_level(tables: &PropertyTables, ch: char, level: super::Level) -> char {
    if level.is_rtl() {
        tables.mirroring_glyph(ch).unwrap_or(ch)
    } else {
        ch
    }
}

/// Mirror `ch` using the compiled property data.
pub fn mirrored(ch: char) -> char {
    PropertyTables::compiled().mirroring_glyph(ch).unwrap_or(ch)
}
