use std::sync::Arc;

use rune_locale::Locale;

use super::lookahead::Lookahead;
use super::Progress;
use crate::properties::{PropertyTables, WordBreak};
use crate::provider::DataProvider;
use crate::unicode::CodeUnits;
use crate::DataError;

/// Options for [`WordSegmenter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBreakOptions {
    /// Language of the content, for locale tailorings.
    pub content_locale: Option<Locale>,
}

/// Classification of the segment that ends at a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WordType {
    /// Whitespace, punctuation, symbols.
    #[default]
    None,
    Number,
    /// Letters, ideographs and kana.
    Letter,
}

impl WordType {
    pub fn is_word_like(self) -> bool {
        self != WordType::None
    }
}

/// Colons that Finnish and Swedish do not treat as MidLetter.
const TAILORED_COLONS: [char; 4] = [':', '\u{FE13}', '\u{FE55}', '\u{FF1A}'];

/// Segments text into words (UAX #29).
#[derive(Debug, Clone)]
pub struct WordSegmenter {
    tables: Arc<PropertyTables>,
    colon_breaks: bool,
}

impl Default for WordSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSegmenter {
    pub fn new() -> Self {
        Self::from_tables(PropertyTables::compiled(), WordBreakOptions::default())
    }

    pub fn try_new_with_provider<P: DataProvider + ?Sized>(
        provider: &P,
        options: WordBreakOptions,
    ) -> Result<Self, DataError> {
        let tables = provider.load_properties()?;
        tracing::debug!(
            version = %tables.version(),
            locale = ?options.content_locale.as_ref().map(ToString::to_string),
            "word segmenter built from provider"
        );
        Ok(Self::from_tables(tables, options))
    }

    fn from_tables(tables: Arc<PropertyTables>, options: WordBreakOptions) -> Self {
        let colon_breaks = options
            .content_locale
            .as_ref()
            .is_some_and(|locale| matches!(locale.language(), "fi" | "sv"));
        Self {
            tables,
            colon_breaks,
        }
    }

    pub fn segment_str<'t>(&self, text: &'t str) -> WordBreakIterator<'t, str> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-8; offsets are in bytes.
    pub fn segment_utf8<'t>(&self, text: &'t [u8]) -> WordBreakIterator<'t, [u8]> {
        self.segment(text)
    }

    /// Segments potentially ill-formed UTF-16; offsets are in 16-bit units.
    pub fn segment_utf16<'t>(&self, text: &'t [u16]) -> WordBreakIterator<'t, [u16]> {
        self.segment(text)
    }

    fn segment<'t, Y: CodeUnits + ?Sized>(&self, text: &'t Y) -> WordBreakIterator<'t, Y> {
        WordBreakIterator {
            tables: Arc::clone(&self.tables),
            colon_breaks: self.colon_breaks,
            chars: Lookahead::new(text.code_points()),
            len: text.unit_len(),
            progress: Progress::Start,
            prev: None,
            prev_prev: None,
            prev_raw: None,
            ri_odd: false,
            current_type: WordType::None,
            last_type: WordType::None,
        }
    }
}

fn is_ah_letter(class: WordBreak) -> bool {
    matches!(class, WordBreak::ALetter | WordBreak::HebrewLetter)
}

fn is_mid_letter_q(class: WordBreak) -> bool {
    matches!(
        class,
        WordBreak::MidLetter | WordBreak::MidNumLet | WordBreak::SingleQuote
    )
}

fn is_mid_num_q(class: WordBreak) -> bool {
    matches!(
        class,
        WordBreak::MidNum | WordBreak::MidNumLet | WordBreak::SingleQuote
    )
}

/// Word boundaries, as code unit offsets.
pub struct WordBreakIterator<'t, Y: CodeUnits + ?Sized + 't> {
    tables: Arc<PropertyTables>,
    colon_breaks: bool,
    chars: Lookahead<Y::CodePoints<'t>>,
    len: usize,
    progress: Progress,
    /// Last class that WB4 does not absorb, and the one before it.
    prev: Option<WordBreak>,
    prev_prev: Option<WordBreak>,
    /// Class of the last character, absorbed or not.
    prev_raw: Option<WordBreak>,
    ri_odd: bool,
    current_type: WordType,
    last_type: WordType,
}

impl<'t, Y: CodeUnits + ?Sized + 't> WordBreakIterator<'t, Y> {
    /// Type of the segment ending at the most recent boundary.
    pub fn word_type(&self) -> WordType {
        self.last_type
    }

    pub fn is_word_like(&self) -> bool {
        self.last_type.is_word_like()
    }

    fn class(&self, c: char) -> WordBreak {
        if self.colon_breaks && TAILORED_COLONS.contains(&c) {
            WordBreak::Other
        } else {
            self.tables.word_break(c)
        }
    }

    fn char_type(&self, c: char, class: WordBreak) -> WordType {
        match class {
            WordBreak::ALetter | WordBreak::HebrewLetter | WordBreak::Katakana => WordType::Letter,
            WordBreak::Numeric => WordType::Number,
            WordBreak::Other if c.is_alphabetic() => WordType::Letter,
            _ => WordType::None,
        }
    }

    /// Next class after the cursor that WB4 does not absorb.
    fn peek_class(&mut self) -> Option<WordBreak> {
        let mut n = 0;
        while let Some((_, c)) = self.chars.peek(n) {
            let class = self.class(c);
            if !class.is_ignorable() {
                return Some(class);
            }
            n += 1;
        }
        None
    }

    fn is_boundary(&mut self, cur: WordBreak) -> bool {
        use WordBreak::*;

        let Some(raw) = self.prev_raw else {
            return false;
        };
        // WB3, WB3a, WB3b
        if raw == CR && cur == LF {
            return false;
        }
        if matches!(raw, CR | LF | Newline) || matches!(cur, CR | LF | Newline) {
            return true;
        }
        // WB3c, WB3d
        if raw == ZWJ && cur == ExtendedPictographic {
            return false;
        }
        if raw == WSegSpace && cur == WSegSpace {
            return false;
        }
        // WB4
        if cur.is_ignorable() {
            return false;
        }

        let prev = self.prev.unwrap_or(raw);
        let needs_next = (is_ah_letter(prev) && is_mid_letter_q(cur))
            || (prev == HebrewLetter && cur == DoubleQuote)
            || (prev == Numeric && is_mid_num_q(cur));
        let next = if needs_next { self.peek_class() } else { None };
        let before = self.prev_prev;

        match (prev, cur) {
            // WB5
            (p, c) if is_ah_letter(p) && is_ah_letter(c) => false,
            // WB6
            (p, c) if is_ah_letter(p) && is_mid_letter_q(c) && next.is_some_and(is_ah_letter) => false,
            // WB7
            (p, c) if is_mid_letter_q(p) && is_ah_letter(c) && before.is_some_and(is_ah_letter) => false,
            // WB7a, WB7b, WB7c
            (HebrewLetter, SingleQuote) => false,
            (HebrewLetter, DoubleQuote) if next == Some(HebrewLetter) => false,
            (DoubleQuote, HebrewLetter) if before == Some(HebrewLetter) => false,
            // WB8, WB9, WB10
            (Numeric, Numeric) => false,
            (p, Numeric) if is_ah_letter(p) => false,
            (Numeric, c) if is_ah_letter(c) => false,
            // WB11, WB12
            (p, Numeric) if is_mid_num_q(p) && before == Some(Numeric) => false,
            (Numeric, c) if is_mid_num_q(c) && next == Some(Numeric) => false,
            // WB13, WB13a, WB13b
            (Katakana, Katakana) => false,
            (ALetter | HebrewLetter | Numeric | Katakana | ExtendNumLet, ExtendNumLet) => false,
            (ExtendNumLet, ALetter | HebrewLetter | Numeric | Katakana) => false,
            // WB15, WB16
            (RegionalIndicator, RegionalIndicator) => !self.ri_odd,
            // WB999
            _ => true,
        }
    }

    fn accept(&mut self, cur: WordBreak, boundary: bool) {
        self.prev_raw = Some(cur);
        if cur.is_ignorable() && !boundary && self.prev.is_some() {
            return;
        }
        self.ri_odd = cur == WordBreak::RegionalIndicator
            && !(self.prev == Some(WordBreak::RegionalIndicator) && self.ri_odd && !boundary);
        self.prev_prev = self.prev;
        self.prev = Some(cur);
    }
}

impl<'t, Y: CodeUnits + ?Sized + 't> Iterator for WordBreakIterator<'t, Y> {
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
            let class = self.class(c);
            let boundary = self.is_boundary(class);
            let char_type = self.char_type(c, class);
            self.accept(class, boundary);
            if boundary {
                self.last_type = self.current_type;
                self.current_type = char_type;
                return Some(offset);
            }
            self.current_type = self.current_type.max(char_type);
        }
        self.progress = Progress::Done;
        self.last_type = self.current_type;
        (self.len > 0).then_some(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_segmentation::UnicodeSegmentation;

    fn boundaries(text: &str) -> Vec<usize> {
        WordSegmenter::new().segment_str(text).collect()
    }

    fn words(segmenter: &WordSegmenter, text: &str) -> Vec<String> {
        let offsets: Vec<usize> = segmenter.segment_str(text).collect();
        offsets
            .windows(2)
            .map(|w| text[w[0]..w[1]].to_string())
            .collect()
    }

    #[test]
    fn splits_sentence_into_words() {
        let text = "The quick (\"brown\") fox can't jump 32.3 feet, right?";
        let found = words(&WordSegmenter::new(), text);
        let expected = [
            "The", " ", "quick", " ", "(", "\"", "brown", "\"", ")", " ", "fox", " ", "can't",
            " ", "jump", " ", "32.3", " ", "feet", ",", " ", "right", "?",
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn empty_text_yields_single_boundary() {
        let mut it = WordSegmenter::new().segment_str("");
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.word_type(), WordType::None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn reports_word_types() {
        let segmenter = WordSegmenter::new();
        let mut it = segmenter.segment_str("abc 123 中");
        let mut types = Vec::new();
        it.next();
        while it.next().is_some() {
            types.push((it.word_type(), it.is_word_like()));
        }
        assert_eq!(
            types,
            vec![
                (WordType::Letter, true),
                (WordType::None, false),
                (WordType::Number, true),
                (WordType::None, false),
                (WordType::Letter, true),
            ]
        );
    }

    #[test]
    fn extend_and_format_attach_to_previous() {
        assert_eq!(boundaries("e\u{0301}e\u{00AD}f g"), vec![0, 7, 8, 9]);
    }

    #[test]
    fn hebrew_quotes_and_numbers() {
        assert_eq!(boundaries("צה\"ל"), vec![0, 7]);
        assert_eq!(boundaries("1,000.5"), vec![0, 7]);
        assert_eq!(boundaries("3a"), vec![0, 2]);
    }

    #[test]
    fn swedish_colon_is_not_mid_letter() {
        let default = words(&WordSegmenter::new(), "a:b");
        assert_eq!(default, ["a:b"]);

        let options = WordBreakOptions {
            content_locale: Some("sv-SE".parse().unwrap()),
        };
        let sv = WordSegmenter::try_new_with_provider(&crate::CompiledDataProvider, options).unwrap();
        assert_eq!(words(&sv, "a:b"), ["a", ":", "b"]);
    }

    #[test]
    fn agrees_with_unicode_segmentation() {
        for text in [
            "Hello, world!",
            "can't won't \"quoted\"",
            "ab_cd 12_34 __",
            "\u{1F1EF}\u{1F1F5}\u{1F1F0}\u{1F1F7}\u{1F1FA}",
            "line\r\nbreak\nhere",
            "tab\tspace  two",
        ] {
            let mut expected: Vec<usize> = text.split_word_bound_indices().map(|(i, _)| i).collect();
            expected.push(text.len());
            assert_eq!(boundaries(text), expected, "{text:?}");
        }
    }
}
