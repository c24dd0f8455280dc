use std::sync::Arc;

use super::grapheme::GraphemeState;
use super::Progress;
use crate::properties::tables::{contains, CJK_NON_STARTER_SPAN};
use crate::properties::{GraphemeClusterBreak, LineBreakClass, PropertyTables};
use crate::provider::DataProvider;
use crate::unicode::CodeUnits;
use crate::DataError;

/// How strictly line-breaking rules treat Japanese and Chinese text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakStrictness {
    /// Also breaks before CJK non-starters.
    Loose,
    /// Breaks before small kana (conditional Japanese starters).
    Normal,
    #[default]
    Strict,
    /// Breaks at every grapheme cluster boundary.
    Anywhere,
}

/// Word-level line-breaking behavior, as in CSS `word-break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakWordOption {
    #[default]
    Normal,
    /// Letters and digits break like ideographs.
    BreakAll,
    /// Ideographs and Hangul do not break between each other.
    KeepAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineBreakOptions {
    pub strictness: LineBreakStrictness,
    pub word_option: LineBreakWordOption,
}

/// Whether a line break opportunity is forced or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBreakKind {
    Mandatory,
    Allowed,
}

/// Finds line break opportunities (UAX #14).
#[derive(Debug, Clone)]
pub struct LineSegmenter {
    tables: Arc<PropertyTables>,
    options: LineBreakOptions,
}

impl Default for LineSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSegmenter {
    pub fn new() -> Self {
        Self {
            tables: PropertyTables::compiled(),
            options: LineBreakOptions::default(),
        }
    }

    pub fn try_new_with_provider<P: DataProvider + ?Sized>(
        provider: &P,
        options: LineBreakOptions,
    ) -> Result<Self, DataError> {
        let tables = provider.load_properties()?;
        tracing::debug!(
            version = %tables.version(),
            strictness = ?options.strictness,
            word_option = ?options.word_option,
            "line segmenter built from provider"
        );
        Ok(Self { tables, options })
    }

    pub fn options(&self) -> LineBreakOptions {
        self.options
    }

    pub fn segment_str<'t>(&self, text: &'t str) -> LineBreakIterator<'t, str> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-8; offsets are in bytes.
    pub fn segment_utf8<'t>(&self, text: &'t [u8]) -> LineBreakIterator<'t, [u8]> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-16; offsets are in 16-bit units.
    pub fn segment_utf16<'t>(&self, text: &'t [u16]) -> LineBreakIterator<'t, [u16]> {
        self.segment(text)
    }

    fn segment<'t, Y: CodeUnits + ?Sized>(&self, text: &'t Y) -> LineBreakIterator<'t, Y> {
        LineBreakIterator {
            tables: Arc::clone(&self.tables),
            options: self.options,
            chars: text.code_points(),
            len: text.unit_len(),
            progress: Progress::Start,
            context: LineContext::default(),
            graphemes: GraphemeState::default(),
            kind: None,
        }
    }
}

/// Resolves a character's class per LB1 and the tailoring options.
fn resolve_class(tables: &PropertyTables, options: LineBreakOptions, c: char) -> LineBreakClass {
    use LineBreakClass::*;

    let raw = tables.line_break(c);
    let class = match raw {
        AI | SG | XX => AL,
        SA => match tables.grapheme_cluster_break(c) {
            GraphemeClusterBreak::Extend | GraphemeClusterBreak::SpacingMark => CM,
            _ => AL,
        },
        CJ if options.strictness == LineBreakStrictness::Strict => NS,
        CJ => ID,
        NS if options.strictness == LineBreakStrictness::Loose
            && contains(CJK_NON_STARTER_SPAN, c) =>
        {
            ID
        }
        other => other,
    };
    match options.word_option {
        LineBreakWordOption::BreakAll if matches!(class, AL | HL | NU) => ID,
        LineBreakWordOption::KeepAll if matches!(class, ID | H2 | H3 | JL | JV | JT) || raw == CJ => AL,
        _ => class,
    }
}

/// Pair-rule context: the classes that the rules look back at.
#[derive(Debug, Clone, Copy, Default)]
struct LineContext {
    /// Class of the last character that LB9 did not absorb, after LB10.
    prev: Option<LineBreakClass>,
    prev_prev: Option<LineBreakClass>,
    /// Class before the current run of spaces.
    before_spaces: Option<LineBreakClass>,
    /// Class of the very last character, for LB8a.
    prev_raw: Option<LineBreakClass>,
    /// Character behind `prev`, for LB30.
    prev_char: char,
    ri_odd: bool,
}

impl LineContext {
    /// LB4 through LB31 for a break before `cur`. `None` means no break.
    fn decide(
        &self,
        tables: &PropertyTables,
        cur: LineBreakClass,
        cur_char: char,
    ) -> Option<LineBreakKind> {
        use LineBreakClass::*;
        use LineBreakKind::{Allowed, Mandatory};

        let prev = self.prev?;
        // LB4, LB5
        match (prev, cur) {
            (CR, LF) => return None,
            (BK | CR | LF | NL, _) => return Some(Mandatory),
            _ => {}
        }
        // LB6, LB7
        if matches!(cur, BK | CR | LF | NL | SP | ZW) {
            return None;
        }
        // LB8
        if prev == ZW || (prev == SP && self.before_spaces == Some(ZW)) {
            return Some(Allowed);
        }
        // LB8a
        if self.prev_raw == Some(ZWJ) {
            return None;
        }
        // LB9
        if matches!(cur, CM | ZWJ) && !matches!(prev, SP | ZW) {
            return None;
        }
        // LB10
        let cur = if matches!(cur, CM | ZWJ) { AL } else { cur };
        // LB11, LB12, LB12a
        if cur == WJ || prev == WJ || prev == GL {
            return None;
        }
        if cur == GL && !matches!(prev, SP | BA | HY) {
            return None;
        }
        // LB13
        if matches!(cur, CL | CP | EX | IS | SY) {
            return None;
        }
        // LB14 through LB17 look through spaces.
        let before = if prev == SP { self.before_spaces } else { Some(prev) };
        if before == Some(OP) {
            return None;
        }
        if cur == OP && before == Some(QU) {
            return None;
        }
        if cur == NS && matches!(before, Some(CL | CP)) {
            return None;
        }
        if cur == B2 && before == Some(B2) {
            return None;
        }
        // LB18
        if prev == SP {
            return Some(Allowed);
        }
        // LB19, LB20
        if cur == QU || prev == QU {
            return None;
        }
        if cur == CB || prev == CB {
            return Some(Allowed);
        }
        // LB21, LB21a, LB21b, LB22
        if matches!(cur, BA | HY | NS) || prev == BB {
            return None;
        }
        if matches!(prev, HY | BA) && self.prev_prev == Some(HL) {
            return None;
        }
        if (prev == SY && cur == HL) || cur == IN {
            return None;
        }

        let keep = match (prev, cur) {
            // LB23, LB23a, LB24
            (AL | HL, NU) | (NU, AL | HL) => true,
            (PR, ID | EB | EM) | (ID | EB | EM, PO) => true,
            (PR | PO, AL | HL) | (AL | HL, PR | PO) => true,
            // LB25
            (CL | CP | NU, PO | PR) | (PO | PR, OP | NU) | (HY | IS | NU | SY, NU) => true,
            // LB26, LB27
            (JL, JL | JV | H2 | H3) | (JV | H2, JV | JT) | (JT | H3, JT) => true,
            (JL | JV | JT | H2 | H3, PO) | (PR, JL | JV | JT | H2 | H3) => true,
            // LB28, LB29
            (AL | HL, AL | HL) | (IS, AL | HL) => true,
            // LB30
            (AL | HL | NU, OP) => !tables.is_east_asian_wide(cur_char),
            (CP, AL | HL | NU) => !tables.is_east_asian_wide(self.prev_char),
            // LB30a, LB30b
            (RI, RI) => self.ri_odd,
            (EB, EM) => true,
            _ => false,
        };
        // LB31
        if keep { None } else { Some(Allowed) }
    }

    fn accept(&mut self, cur: LineBreakClass, c: char) {
        use LineBreakClass::*;

        let absorbed = matches!(cur, CM | ZWJ)
            && self
                .prev
                .is_some_and(|prev| !matches!(prev, BK | CR | LF | NL | SP | ZW));
        self.prev_raw = Some(cur);
        if absorbed {
            return;
        }
        let effective = if matches!(cur, CM | ZWJ) { AL } else { cur };
        if effective == SP && self.prev != Some(SP) {
            self.before_spaces = self.prev;
        }
        self.ri_odd = effective == RI && !(self.prev == Some(RI) && self.ri_odd);
        self.prev_prev = self.prev;
        self.prev = Some(effective);
        self.prev_char = c;
    }
}

/// Line break opportunities, as code unit offsets.
pub struct LineBreakIterator<'t, Y: CodeUnits + ?Sized + 't> {
    tables: Arc<PropertyTables>,
    options: LineBreakOptions,
    chars: Y::CodePoints<'t>,
    len: usize,
    progress: Progress,
    context: LineContext,
    graphemes: GraphemeState,
    kind: Option<LineBreakKind>,
}

impl<'t, Y: CodeUnits + ?Sized + 't> LineBreakIterator<'t, Y> {
    /// Kind of the most recent boundary; `None` for the start of text.
    pub fn break_kind(&self) -> Option<LineBreakKind> {
        self.kind
    }

    fn decide_anywhere(&mut self, cur: LineBreakClass, c: char) -> Option<LineBreakKind> {
        use LineBreakClass::*;

        let cluster_boundary = self
            .graphemes
            .advance(self.tables.grapheme_cluster_break(c));
        match (self.context.prev?, cur) {
            (CR, LF) => None,
            (BK | CR | LF | NL, _) => Some(LineBreakKind::Mandatory),
            (_, BK | CR | LF | NL) => None,
            _ => cluster_boundary.then_some(LineBreakKind::Allowed),
        }
    }
}

impl<'t, Y: CodeUnits + ?Sized + 't> Iterator for LineBreakIterator<'t, Y> {
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
        while let Some((offset, c)) = self.chars.next() {
            let class = resolve_class(&self.tables, self.options, c);
            let kind = if self.options.strictness == LineBreakStrictness::Anywhere {
                self.decide_anywhere(class, c)
            } else {
                self.context.decide(&self.tables, class, c)
            };
            self.context.accept(class, c);
            if let Some(kind) = kind {
                self.kind = Some(kind);
                return Some(offset);
            }
        }
        self.progress = Progress::Done;
        // LB3
        self.kind = Some(LineBreakKind::Mandatory);
        (self.len > 0).then_some(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompiledDataProvider;

    fn breaks(text: &str) -> Vec<usize> {
        LineSegmenter::new().segment_str(text).collect()
    }

    fn breaks_with(text: &str, options: LineBreakOptions) -> Vec<usize> {
        LineSegmenter::try_new_with_provider(&CompiledDataProvider, options)
            .unwrap()
            .segment_str(text)
            .collect()
    }

    #[test]
    fn breaks_after_spaces() {
        assert_eq!(breaks("Hello world"), vec![0, 6, 11]);
        assert_eq!(breaks("a  b"), vec![0, 3, 4]);
    }

    #[test]
    fn empty_text_yields_single_boundary() {
        let mut it = LineSegmenter::new().segment_str("");
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.break_kind(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn reports_mandatory_breaks() {
        let mut it = LineSegmenter::new().segment_str("ab\ncd ef");
        let mut found = Vec::new();
        while let Some(offset) = it.next() {
            found.push((offset, it.break_kind()));
        }
        assert_eq!(
            found,
            vec![
                (0, None),
                (3, Some(LineBreakKind::Mandatory)),
                (6, Some(LineBreakKind::Allowed)),
                (8, Some(LineBreakKind::Mandatory)),
            ]
        );
        assert_eq!(breaks("a\r\nb"), vec![0, 3, 4]);
    }

    #[test]
    fn punctuation_and_numbers_hold_together() {
        assert_eq!(breaks("(abc) def"), vec![0, 6, 9]);
        assert_eq!(breaks("$100.00 off"), vec![0, 8, 11]);
        assert_eq!(breaks("well-known"), vec![0, 5, 10]);
        assert_eq!(breaks("a\u{00A0}b c"), vec![0, 5, 6]);
    }

    #[test]
    fn ideographs_break_between_each_other() {
        assert_eq!(breaks("中文字"), vec![0, 3, 6, 9]);
        // No break before a closing ideographic full stop.
        assert_eq!(breaks("中文。"), vec![0, 3, 9]);
    }

    #[test]
    fn keep_all_and_break_all() {
        let keep_all = LineBreakOptions {
            word_option: LineBreakWordOption::KeepAll,
            ..LineBreakOptions::default()
        };
        assert_eq!(breaks_with("中文字 한국어", keep_all), vec![0, 10, 19]);

        let break_all = LineBreakOptions {
            word_option: LineBreakWordOption::BreakAll,
            ..LineBreakOptions::default()
        };
        assert_eq!(breaks_with("abc", break_all), vec![0, 1, 2, 3]);
    }

    #[test]
    fn strictness_controls_small_kana() {
        // HIRAGANA LETTER SMALL A is a conditional Japanese starter.
        let text = "あぁ";
        assert_eq!(breaks(text), vec![0, 6]);
        let normal = LineBreakOptions {
            strictness: LineBreakStrictness::Normal,
            ..LineBreakOptions::default()
        };
        assert_eq!(breaks_with(text, normal), vec![0, 3, 6]);
    }

    #[test]
    fn anywhere_breaks_between_clusters() {
        let anywhere = LineBreakOptions {
            strictness: LineBreakStrictness::Anywhere,
            ..LineBreakOptions::default()
        };
        assert_eq!(breaks_with("ab\u{0301}c", anywhere), vec![0, 1, 4, 5]);
        assert_eq!(breaks_with("a\nb", anywhere), vec![0, 2, 3]);
    }

    #[test]
    fn combining_marks_and_emoji_sequences() {
        assert_eq!(breaks("e\u{0301} x"), vec![0, 4, 5]);
        let family = "\u{1F468}\u{200D}\u{1F469}";
        assert_eq!(breaks(family), vec![0, family.len()]);
        // Emoji with a skin tone modifier stay together.
        assert_eq!(breaks("\u{1F44D}\u{1F3FD}"), vec![0, 8]);
    }

    #[test]
    fn utf16_offsets() {
        let units: Vec<u16> = "ab cd".encode_utf16().collect();
        let found: Vec<usize> = LineSegmenter::new().segment_utf16(&units).collect();
        assert_eq!(found, vec![0, 3, 5]);
    }
}
