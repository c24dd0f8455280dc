use std::sync::Arc;

use super::Progress;
use crate::properties::{GraphemeClusterBreak, PropertyTables};
use crate::provider::DataProvider;
use crate::unicode::CodeUnits;
use crate::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EmojiState {
    #[default]
    None,
    /// Extended_Pictographic Extend*
    Pictographic,
    /// Extended_Pictographic Extend* ZWJ
    PictographicZwj,
}

/// Rolling context for the extended grapheme cluster rules.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GraphemeState {
    prev: Option<GraphemeClusterBreak>,
    emoji: EmojiState,
    /// An odd number of regional indicators precedes the cursor.
    ri_odd: bool,
}

impl GraphemeState {
    /// Feeds the next class and reports whether a boundary precedes it.
    /// The first class never produces a boundary.
    pub(crate) fn advance(&mut self, next: GraphemeClusterBreak) -> bool {
        use GraphemeClusterBreak::*;

        let boundary = match self.prev {
            None => false,
            Some(prev) => match (prev, next) {
                // GB3
                (CR, LF) => false,
                // GB4, GB5
                (Control | CR | LF, _) | (_, Control | CR | LF) => true,
                // GB6, GB7, GB8
                (L, L | V | LV | LVT) | (LV | V, V | T) | (LVT | T, T) => false,
                // GB9, GB9a
                (_, Extend | ZWJ | SpacingMark) => false,
                // GB9b
                (Prepend, _) => false,
                // GB11
                (ZWJ, ExtendedPictographic) => self.emoji != EmojiState::PictographicZwj,
                // GB12, GB13
                (RegionalIndicator, RegionalIndicator) => !self.ri_odd,
                _ => true,
            },
        };

        self.emoji = match (next, self.emoji) {
            (ExtendedPictographic, _) => EmojiState::Pictographic,
            (Extend, EmojiState::Pictographic) => EmojiState::Pictographic,
            (ZWJ, EmojiState::Pictographic) => EmojiState::PictographicZwj,
            _ => EmojiState::None,
        };
        self.ri_odd = next == RegionalIndicator && !(self.prev == Some(RegionalIndicator) && self.ri_odd);
        self.prev = Some(next);
        boundary
    }
}

/// Segments text into extended grapheme clusters (UAX #29).
#[derive(Debug, Clone)]
pub struct GraphemeClusterSegmenter {
    tables: Arc<PropertyTables>,
}

impl Default for GraphemeClusterSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphemeClusterSegmenter {
    pub fn new() -> Self {
        Self {
            tables: PropertyTables::compiled(),
        }
    }

    pub fn try_new_with_provider<P: DataProvider + ?Sized>(provider: &P) -> Result<Self, DataError> {
        let tables = provider.load_properties()?;
        tracing::debug!(version = %tables.version(), "grapheme segmenter built from provider");
        Ok(Self { tables })
    }

    pub fn segment_str<'t>(&self, text: &'t str) -> GraphemeClusterBreakIterator<'t, str> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-8; offsets are in bytes.
    pub fn segment_utf8<'t>(&self, text: &'t [u8]) -> GraphemeClusterBreakIterator<'t, [u8]> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-16; offsets are in 16-bit units.
    pub fn segment_utf16<'t>(&self, text: &'t [u16]) -> GraphemeClusterBreakIterator<'t, [u16]> {
        self.segment(text)
    }

    fn segment<'t, Y: CodeUnits + ?Sized>(&self, text: &'t Y) -> GraphemeClusterBreakIterator<'t, Y> {
        GraphemeClusterBreakIterator {
            tables: Arc::clone(&self.tables),
            chars: text.code_points(),
            len: text.unit_len(),
            state: GraphemeState::default(),
            progress: Progress::Start,
        }
    }
}

/// Boundaries between grapheme clusters, as code unit offsets.
pub struct GraphemeClusterBreakIterator<'t, Y: CodeUnits + ?Sized + 't> {
    tables: Arc<PropertyTables>,
    chars: Y::CodePoints<'t>,
    len: usize,
    state: GraphemeState,
    progress: Progress,
}

impl<'t, Y: CodeUnits + ?Sized + 't> Iterator for GraphemeClusterBreakIterator<'t, Y> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.progress {
            Progress::Done => return None,
            Progress::Start => {
                self.progress = Progress::Running;
                return Some(0);
            }
            Progress::Running => {}
        }
        for (offset, c) in self.chars.by_ref() {
            let class = self.tables.grapheme_cluster_break(c);
            if self.state.advance(class) {
                return Some(offset);
            }
        }
        self.progress = Progress::Done;
        // Empty text has a single boundary at 0, already returned.
        (self.len > 0).then_some(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_segmentation::UnicodeSegmentation;

    fn boundaries(text: &str) -> Vec<usize> {
        GraphemeClusterSegmenter::new().segment_str(text).collect()
    }

    fn oracle(text: &str) -> Vec<usize> {
        let mut expected: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        expected.push(text.len());
        expected
    }

    #[test]
    fn basic_ascii_graphemes() {
        assert_eq!(boundaries("abc"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_text_yields_single_boundary() {
        let mut it = GraphemeClusterSegmenter::new().segment_str("");
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn combining_mark_stays_with_base() {
        assert_eq!(boundaries("a\u{0301}b"), vec![0, 3, 4]);
    }

    #[test]
    fn emoji_zwj_sequence_is_single_cluster() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
        assert_eq!(boundaries(family), vec![0, family.len()]);
        // ZWJ without a preceding pictograph does not join.
        assert_eq!(boundaries("a\u{200D}\u{1F466}"), vec![0, 4, 8]);
    }

    #[test]
    fn regional_indicators_pair_up() {
        let flags = "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}\u{1F1E9}";
        assert_eq!(boundaries(flags), vec![0, 8, 16, 20]);
    }

    #[test]
    fn crlf_and_hangul_jamo() {
        assert_eq!(boundaries("\r\n\n"), vec![0, 2, 3]);
        assert_eq!(boundaries("\u{1100}\u{1161}\u{11A8}\u{1100}"), vec![0, 9, 12]);
    }

    #[test]
    fn agrees_with_unicode_segmentation() {
        for text in [
            "Hello, world!",
            "e\u{0301}\u{0302}x",
            "한국어 텍스트",
            "\u{1F1EF}\u{1F1F5}\u{1F1F0}\u{1F1F7}",
            "\u{1F44D}\u{1F3FD} ok",
            "a\r\nb\u{0085}c",
            "אֱלֹהִים",
        ] {
            assert_eq!(boundaries(text), oracle(text), "{text:?}");
        }
    }

    #[test]
    fn utf16_offsets() {
        let units: Vec<u16> = "a\u{0301}\u{1F600}".encode_utf16().collect();
        let found: Vec<usize> = GraphemeClusterSegmenter::new().segment_utf16(&units).collect();
        assert_eq!(found, vec![0, 2, 4]);
    }

    #[test]
    fn ill_formed_utf8_breaks_around_replacements() {
        let found: Vec<usize> = GraphemeClusterSegmenter::new()
            .segment_utf8(b"a\xFF\xFEb")
            .collect();
        assert_eq!(found, vec![0, 1, 2, 3, 4]);
    }
}
