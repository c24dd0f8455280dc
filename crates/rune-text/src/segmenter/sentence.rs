use std::sync::Arc;

use super::lookahead::Lookahead;
use super::Progress;
use crate::properties::{PropertyTables, SentenceBreak};
use crate::provider::DataProvider;
use crate::unicode::CodeUnits;
use crate::DataError;

/// Segments text into sentences (UAX #29).
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    tables: Arc<PropertyTables>,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self {
            tables: PropertyTables::compiled(),
        }
    }

    pub fn try_new_with_provider<P: DataProvider + ?Sized>(provider: &P) -> Result<Self, DataError> {
        let tables = provider.load_properties()?;
        tracing::debug!(version = %tables.version(), "sentence segmenter built from provider");
        Ok(Self { tables })
    }

    pub fn segment_str<'t>(&self, text: &'t str) -> SentenceBreakIterator<'t, str> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-8; offsets are in bytes.
    pub fn segment_utf8<'t>(&self, text: &'t [u8]) -> SentenceBreakIterator<'t, [u8]> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-16; offsets are in 16-bit units.
    pub fn segment_utf16<'t>(&self, text: &'t [u16]) -> SentenceBreakIterator<'t, [u16]> {
        self.segment(text)
    }

    fn segment<'t, Y: CodeUnits + ?Sized>(&self, text: &'t Y) -> SentenceBreakIterator<'t, Y> {
        SentenceBreakIterator {
            tables: Arc::clone(&self.tables),
            chars: Lookahead::new(text.code_points()),
            len: text.unit_len(),
            progress: Progress::Start,
            prev: None,
            prev_raw: None,
            term: None,
        }
    }
}

/// A sentence terminator followed by `Close* Sp*`, as seen so far.
#[derive(Debug, Clone, Copy)]
struct Terminator {
    aterm: bool,
    /// Class before the terminator, for SB7.
    before: Option<SentenceBreak>,
    seen_close: bool,
    seen_sp: bool,
    /// SB8 answer for the run of non-stop classes after the terminator.
    lower_ahead: Option<bool>,
}

fn is_sb8_stop(class: SentenceBreak) -> bool {
    use SentenceBreak::*;
    matches!(class, OLetter | Upper | Lower | ATerm | STerm) || class.is_para_sep()
}

/// Sentence boundaries, as code unit offsets.
pub struct SentenceBreakIterator<'t, Y: CodeUnits + ?Sized + 't> {
    tables: Arc<PropertyTables>,
    chars: Lookahead<Y::CodePoints<'t>>,
    len: usize,
    progress: Progress,
    /// Last class that SB5 does not absorb.
    prev: Option<SentenceBreak>,
    prev_raw: Option<SentenceBreak>,
    term: Option<Terminator>,
}

impl<'t, Y: CodeUnits + ?Sized + 't> SentenceBreakIterator<'t, Y> {
    /// SB8: whether a Lower follows, looking past anything that is not a
    /// letter, terminator or separator.
    ///
    /// Every position up to the next stop class shares one answer, so it is
    /// scanned once per terminator and kept in `term`.
    fn lower_follows(&mut self, cur: SentenceBreak) -> bool {
        if cur == SentenceBreak::Lower {
            return true;
        }
        if is_sb8_stop(cur) {
            return false;
        }
        if let Some(answer) = self.term.and_then(|term| term.lower_ahead) {
            return answer;
        }
        let mut answer = false;
        let mut n = 0;
        while let Some((_, c)) = self.chars.peek(n) {
            let class = self.tables.sentence_break(c);
            if is_sb8_stop(class) {
                answer = class == SentenceBreak::Lower;
                break;
            }
            n += 1;
        }
        if let Some(term) = self.term.as_mut() {
            term.lower_ahead = Some(answer);
        }
        answer
    }

    fn is_boundary(&mut self, cur: SentenceBreak) -> bool {
        use SentenceBreak::*;

        let Some(raw) = self.prev_raw else {
            return false;
        };
        // SB3, SB4
        if raw == CR && cur == LF {
            return false;
        }
        if raw.is_para_sep() {
            return true;
        }
        // SB5
        if matches!(cur, Extend | Format) {
            return false;
        }
        // SB998
        let Some(term) = self.term else {
            return false;
        };
        let directly_after = !term.seen_close && !term.seen_sp;
        // SB6, SB7
        if term.aterm && directly_after && cur == Numeric {
            return false;
        }
        if term.aterm && directly_after && cur == Upper && matches!(term.before, Some(Upper | Lower)) {
            return false;
        }
        // SB8
        if term.aterm && self.lower_follows(cur) {
            return false;
        }
        // SB8a
        if matches!(cur, SContinue | ATerm | STerm) {
            return false;
        }
        // SB9, SB10
        if cur == Close && !term.seen_sp {
            return false;
        }
        if cur == Sp || cur.is_para_sep() {
            return false;
        }
        // SB11
        true
    }

    fn accept(&mut self, cur: SentenceBreak, boundary: bool) {
        use SentenceBreak::*;

        self.prev_raw = Some(cur);
        if matches!(cur, Extend | Format) && !boundary && self.prev.is_some() {
            return;
        }
        self.term = match (cur, self.term) {
            (ATerm | STerm, _) => Some(Terminator {
                aterm: cur == ATerm,
                before: self.prev,
                seen_close: false,
                seen_sp: false,
                lower_ahead: None,
            }),
            (Close, Some(term)) if !boundary && !term.seen_sp => Some(Terminator {
                seen_close: true,
                ..term
            }),
            (Sp, Some(term)) if !boundary => Some(Terminator {
                seen_sp: true,
                ..term
            }),
            _ => None,
        };
        self.prev = Some(cur);
    }
}

impl<'t, Y: CodeUnits + ?Sized + 't> Iterator for SentenceBreakIterator<'t, Y> {
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
            let class = self.tables.sentence_break(c);
            let boundary = self.is_boundary(class);
            self.accept(class, boundary);
            if boundary {
                return Some(offset);
            }
        }
        self.progress = Progress::Done;
        (self.len > 0).then_some(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        let offsets: Vec<usize> = SentenceSegmenter::new().segment_str(text).collect();
        offsets.windows(2).map(|w| &text[w[0]..w[1]]).collect()
    }

    #[test]
    fn splits_after_terminators_and_spaces() {
        assert_eq!(
            sentences("Hello world. How are you? Fine!"),
            ["Hello world. ", "How are you? ", "Fine!"]
        );
    }

    #[test]
    fn closing_punctuation_stays_with_sentence() {
        assert_eq!(
            sentences("He said \"Stop.\" Then left."),
            ["He said \"Stop.\" ", "Then left."]
        );
    }

    #[test]
    fn abbreviations_before_lowercase_do_not_break() {
        assert_eq!(sentences("See etc. for more."), ["See etc. for more."]);
        assert_eq!(sentences("U.S.A. is big."), ["U.S.A. is big."]);
        // Without a following lowercase letter the rules do break.
        assert_eq!(sentences("U.S. Army"), ["U.S. ", "Army"]);
        assert_eq!(sentences("Version 3.14 works."), ["Version 3.14 works."]);
    }

    #[test]
    fn paragraph_separators_end_sentences() {
        assert_eq!(sentences("one\r\ntwo\nthree"), ["one\r\n", "two\n", "three"]);
        assert_eq!(sentences("End.\n\nNext"), ["End.\n", "\n", "Next"]);
    }

    #[test]
    fn continuation_punctuation() {
        assert_eq!(sentences("Wait... what?! Yes."), ["Wait... what?! ", "Yes."]);
    }

    #[test]
    fn long_space_run_after_terminator_is_linear() {
        let text = format!("Hi.{}X", " ".repeat(100_000));
        let started = std::time::Instant::now();
        let offsets: Vec<usize> = SentenceSegmenter::new().segment_str(&text).collect();
        let elapsed = started.elapsed();
        assert_eq!(offsets, [0, text.len() - 1, text.len()]);
        assert!(elapsed.as_secs() < 5, "took {elapsed:?}");

        let text = format!("Hi.{}x", ")".repeat(50_000));
        let offsets: Vec<usize> = SentenceSegmenter::new().segment_str(&text).collect();
        assert_eq!(offsets, [0, text.len()]);
    }

    #[test]
    fn format_characters_stay_with_terminator() {
        assert_eq!(sentences("Hi?\u{200B}中"), ["Hi?\u{200B}", "中"]);
        assert_eq!(sentences("\u{00BF}Qué? Sí."), ["\u{00BF}Qué? ", "Sí."]);
    }

    #[test]
    fn empty_and_utf16() {
        let segmenter = SentenceSegmenter::new();
        assert_eq!(segmenter.segment_str("").collect::<Vec<_>>(), vec![0]);

        let units: Vec<u16> = "Hi. Yo".encode_utf16().collect();
        assert_eq!(segmenter.segment_utf16(&units).collect::<Vec<_>>(), vec![0, 4, 6]);
    }
}
