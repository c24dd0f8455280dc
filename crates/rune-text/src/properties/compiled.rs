//! Compiled property data.
//!
//! `Bidi_Class`, `Line_Break` and `Script` come from the UCD tables bundled
//! with `unicode-bidi`, `unicode-linebreak` and `unicode-script`. The
//! segmentation classes and East Asian Width come from the `icu_properties`
//! compiled data.

use icu_properties::props::{EastAsianWidth, ExtendedPictographic};
use icu_properties::{CodePointMapData, CodePointSetData};
use unicode_script::{Script, UnicodeScript};

use super::{BidiClass, GraphemeClusterBreak, LineBreakClass, SentenceBreak, WordBreak};

pub(super) fn bidi_class(c: char) -> BidiClass {
    use unicode_bidi::BidiClass as Ucd;

    #[allow(unreachable_patterns)]
    match unicode_bidi::bidi_class(c) {
        Ucd::AL => BidiClass::AL,
        Ucd::AN => BidiClass::AN,
        Ucd::B => BidiClass::B,
        Ucd::BN => BidiClass::BN,
        Ucd::CS => BidiClass::CS,
        Ucd::EN => BidiClass::EN,
        Ucd::ES => BidiClass::ES,
        Ucd::ET => BidiClass::ET,
        Ucd::FSI => BidiClass::FSI,
        Ucd::L => BidiClass::L,
        Ucd::LRE => BidiClass::LRE,
        Ucd::LRI => BidiClass::LRI,
        Ucd::LRO => BidiClass::LRO,
        Ucd::NSM => BidiClass::NSM,
        Ucd::ON => BidiClass::ON,
        Ucd::PDF => BidiClass::PDF,
        Ucd::PDI => BidiClass::PDI,
        Ucd::R => BidiClass::R,
        Ucd::RLE => BidiClass::RLE,
        Ucd::RLI => BidiClass::RLI,
        Ucd::RLO => BidiClass::RLO,
        Ucd::S => BidiClass::S,
        Ucd::WS => BidiClass::WS,
        _ => BidiClass::L,
    }
}

pub(super) fn line_break(c: char) -> LineBreakClass {
    use unicode_linebreak::BreakClass as Ucd;

    #[allow(unreachable_patterns)]
    match unicode_linebreak::break_property(c as u32) {
        Ucd::Mandatory => LineBreakClass::BK,
        Ucd::CarriageReturn => LineBreakClass::CR,
        Ucd::LineFeed => LineBreakClass::LF,
        Ucd::CombiningMark => LineBreakClass::CM,
        Ucd::NextLine => LineBreakClass::NL,
        Ucd::Surrogate => LineBreakClass::SG,
        Ucd::WordJoiner => LineBreakClass::WJ,
        Ucd::ZeroWidthSpace => LineBreakClass::ZW,
        Ucd::NonBreakingGlue => LineBreakClass::GL,
        Ucd::Space => LineBreakClass::SP,
        Ucd::ZeroWidthJoiner => LineBreakClass::ZWJ,
        Ucd::BeforeAndAfter => LineBreakClass::B2,
        Ucd::After => LineBreakClass::BA,
        Ucd::Before => LineBreakClass::BB,
        Ucd::Hyphen => LineBreakClass::HY,
        Ucd::Contingent => LineBreakClass::CB,
        Ucd::ClosePunctuation => LineBreakClass::CL,
        Ucd::CloseParenthesis => LineBreakClass::CP,
        Ucd::Exclamation => LineBreakClass::EX,
        Ucd::Inseparable => LineBreakClass::IN,
        Ucd::NonStarter => LineBreakClass::NS,
        Ucd::OpenPunctuation => LineBreakClass::OP,
        Ucd::Quotation => LineBreakClass::QU,
        Ucd::InfixSeparator => LineBreakClass::IS,
        Ucd::Numeric => LineBreakClass::NU,
        Ucd::Postfix => LineBreakClass::PO,
        Ucd::Prefix => LineBreakClass::PR,
        Ucd::Symbol => LineBreakClass::SY,
        Ucd::Ambiguous => LineBreakClass::AI,
        Ucd::Alphabetic => LineBreakClass::AL,
        Ucd::ConditionalJapaneseStarter => LineBreakClass::CJ,
        Ucd::EmojiBase => LineBreakClass::EB,
        Ucd::EmojiModifier => LineBreakClass::EM,
        Ucd::HangulLvSyllable => LineBreakClass::H2,
        Ucd::HangulLvtSyllable => LineBreakClass::H3,
        Ucd::HebrewLetter => LineBreakClass::HL,
        Ucd::Ideographic => LineBreakClass::ID,
        Ucd::HangulLJamo => LineBreakClass::JL,
        Ucd::HangulVJamo => LineBreakClass::JV,
        Ucd::HangulTJamo => LineBreakClass::JT,
        Ucd::RegionalIndicator => LineBreakClass::RI,
        Ucd::ComplexContext => LineBreakClass::SA,
        Ucd::Unknown => LineBreakClass::XX,
        _ => LineBreakClass::XX,
    }
}

pub(super) fn script(c: char) -> Script {
    c.script()
}

/// `Extended_Pictographic` only refines characters whose own class is
/// `Other`; a pictograph that is also, say, ALetter keeps that class.
fn is_extended_pictographic(c: char) -> bool {
    CodePointSetData::new::<ExtendedPictographic>().contains(c)
}

pub(super) fn grapheme_cluster_break(c: char) -> GraphemeClusterBreak {
    use icu_properties::props::GraphemeClusterBreak as Ucd;

    match CodePointMapData::<Ucd>::new().get(c) {
        Ucd::CR => GraphemeClusterBreak::CR,
        Ucd::LF => GraphemeClusterBreak::LF,
        Ucd::Control => GraphemeClusterBreak::Control,
        Ucd::Extend | Ucd::EModifier => GraphemeClusterBreak::Extend,
        Ucd::ZWJ => GraphemeClusterBreak::ZWJ,
        Ucd::RegionalIndicator => GraphemeClusterBreak::RegionalIndicator,
        Ucd::Prepend => GraphemeClusterBreak::Prepend,
        Ucd::SpacingMark => GraphemeClusterBreak::SpacingMark,
        Ucd::L => GraphemeClusterBreak::L,
        Ucd::V => GraphemeClusterBreak::V,
        Ucd::T => GraphemeClusterBreak::T,
        Ucd::LV => GraphemeClusterBreak::LV,
        Ucd::LVT => GraphemeClusterBreak::LVT,
        Ucd::EBase | Ucd::EBaseGAZ | Ucd::GlueAfterZwj => GraphemeClusterBreak::ExtendedPictographic,
        _ if is_extended_pictographic(c) => GraphemeClusterBreak::ExtendedPictographic,
        _ => GraphemeClusterBreak::Other,
    }
}

pub(super) fn word_break(c: char) -> WordBreak {
    use icu_properties::props::WordBreak as Ucd;

    match CodePointMapData::<Ucd>::new().get(c) {
        Ucd::CR => WordBreak::CR,
        Ucd::LF => WordBreak::LF,
        Ucd::Newline => WordBreak::Newline,
        Ucd::Extend | Ucd::EModifier => WordBreak::Extend,
        Ucd::ZWJ => WordBreak::ZWJ,
        Ucd::RegionalIndicator => WordBreak::RegionalIndicator,
        Ucd::Format => WordBreak::Format,
        Ucd::Katakana => WordBreak::Katakana,
        Ucd::HebrewLetter => WordBreak::HebrewLetter,
        Ucd::ALetter => WordBreak::ALetter,
        Ucd::SingleQuote => WordBreak::SingleQuote,
        Ucd::DoubleQuote => WordBreak::DoubleQuote,
        Ucd::MidNumLet => WordBreak::MidNumLet,
        Ucd::MidLetter => WordBreak::MidLetter,
        Ucd::MidNum => WordBreak::MidNum,
        Ucd::Numeric => WordBreak::Numeric,
        Ucd::ExtendNumLet => WordBreak::ExtendNumLet,
        Ucd::WSegSpace => WordBreak::WSegSpace,
        Ucd::EBase | Ucd::EBaseGAZ | Ucd::GlueAfterZwj => WordBreak::ExtendedPictographic,
        _ if is_extended_pictographic(c) => WordBreak::ExtendedPictographic,
        _ => WordBreak::Other,
    }
}

pub(super) fn sentence_break(c: char) -> SentenceBreak {
    use icu_properties::props::SentenceBreak as Ucd;

    match CodePointMapData::<Ucd>::new().get(c) {
        Ucd::CR => SentenceBreak::CR,
        Ucd::LF => SentenceBreak::LF,
        Ucd::Extend => SentenceBreak::Extend,
        Ucd::Sep => SentenceBreak::Sep,
        Ucd::Format => SentenceBreak::Format,
        Ucd::Sp => SentenceBreak::Sp,
        Ucd::Lower => SentenceBreak::Lower,
        Ucd::Upper => SentenceBreak::Upper,
        Ucd::OLetter => SentenceBreak::OLetter,
        Ucd::Numeric => SentenceBreak::Numeric,
        Ucd::ATerm => SentenceBreak::ATerm,
        Ucd::SContinue => SentenceBreak::SContinue,
        Ucd::STerm => SentenceBreak::STerm,
        Ucd::Close => SentenceBreak::Close,
        _ => SentenceBreak::Other,
    }
}

/// East Asian Width F, W or H.
pub(super) fn is_east_asian_wide(c: char) -> bool {
    matches!(
        CodePointMapData::<EastAsianWidth>::new().get(c),
        EastAsianWidth::Fullwidth | EastAsianWidth::Wide | EastAsianWidth::Halfwidth
    )
}
