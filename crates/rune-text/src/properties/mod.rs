//! Per-code-point Unicode properties used by the bidi resolver and the
//! segmenters.
//!
//! A [`PropertyTables`] value is an immutable, versioned snapshot. The
//! compiled snapshot is shared process-wide; snapshots built from a
//! [`crate::provider::DataProvider`] layer range overrides on top of the
//! compiled data and live independently of it.

mod compiled;
mod overrides;
pub(crate) mod tables;

use std::sync::Arc;

use once_cell::sync::Lazy;
use unicode_script::Script;

pub(crate) use overrides::OverrideDocument;
use overrides::RangeMap;

macro_rules! property_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $property:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $alias:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Property name as used in override documents and errors.
            pub const PROPERTY: &'static str = $property;

            /// Every value of the property, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Short UCD alias of this value.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $alias,)+
                }
            }

            /// Long value name, spelled like the variant.
            pub const fn long_name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// Parses either the short alias or the long name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.name() == name || value.long_name() == name)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

property_enum! {
    /// `Bidi_Class` values from UAX #9.
    #[allow(clippy::upper_case_acronyms)]
    BidiClass, "bidi_class" {
        L => "L",
        R => "R",
        AL => "AL",
        EN => "EN",
        ES => "ES",
        ET => "ET",
        AN => "AN",
        CS => "CS",
        NSM => "NSM",
        BN => "BN",
        B => "B",
        S => "S",
        WS => "WS",
        ON => "ON",
        LRE => "LRE",
        LRO => "LRO",
        RLE => "RLE",
        RLO => "RLO",
        PDF => "PDF",
        LRI => "LRI",
        RLI => "RLI",
        FSI => "FSI",
        PDI => "PDI",
    }
}

impl BidiClass {
    pub const fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    pub const fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// Classes that rule X9 removes from further processing.
    pub const fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            BidiClass::RLE
                | BidiClass::LRE
                | BidiClass::RLO
                | BidiClass::LRO
                | BidiClass::PDF
                | BidiClass::BN
        )
    }
}

property_enum! {
    /// `Line_Break` values from UAX #14.
    #[allow(clippy::upper_case_acronyms)]
    LineBreakClass, "line_break" {
        BK => "BK",
        CR => "CR",
        LF => "LF",
        CM => "CM",
        NL => "NL",
        SG => "SG",
        WJ => "WJ",
        ZW => "ZW",
        GL => "GL",
        SP => "SP",
        ZWJ => "ZWJ",
        B2 => "B2",
        BA => "BA",
        BB => "BB",
        HY => "HY",
        CB => "CB",
        CL => "CL",
        CP => "CP",
        EX => "EX",
        IN => "IN",
        NS => "NS",
        OP => "OP",
        QU => "QU",
        IS => "IS",
        NU => "NU",
        PO => "PO",
        PR => "PR",
        SY => "SY",
        AI => "AI",
        AL => "AL",
        CJ => "CJ",
        EB => "EB",
        EM => "EM",
        H2 => "H2",
        H3 => "H3",
        HL => "HL",
        ID => "ID",
        JL => "JL",
        JV => "JV",
        JT => "JT",
        RI => "RI",
        SA => "SA",
        XX => "XX",
    }
}

property_enum! {
    /// `Grapheme_Cluster_Break` values, with `Extended_Pictographic` folded in.
    GraphemeClusterBreak, "grapheme_cluster_break" {
        Other => "XX",
        CR => "CR",
        LF => "LF",
        Control => "CN",
        Extend => "EX",
        ZWJ => "ZWJ",
        RegionalIndicator => "RI",
        Prepend => "PP",
        SpacingMark => "SM",
        L => "L",
        V => "V",
        T => "T",
        LV => "LV",
        LVT => "LVT",
        ExtendedPictographic => "ExtPict",
    }
}

property_enum! {
    /// `Word_Break` values, with `Extended_Pictographic` folded in.
    WordBreak, "word_break" {
        Other => "XX",
        CR => "CR",
        LF => "LF",
        Newline => "NL",
        Extend => "Extend",
        ZWJ => "ZWJ",
        RegionalIndicator => "RI",
        Format => "FO",
        Katakana => "KA",
        HebrewLetter => "HL",
        ALetter => "LE",
        SingleQuote => "SQ",
        DoubleQuote => "DQ",
        MidNumLet => "MB",
        MidLetter => "ML",
        MidNum => "MN",
        Numeric => "NU",
        ExtendNumLet => "EX",
        WSegSpace => "WSegSpace",
        ExtendedPictographic => "ExtPict",
    }
}

impl WordBreak {
    pub(crate) const fn is_ignorable(self) -> bool {
        matches!(self, WordBreak::Extend | WordBreak::Format | WordBreak::ZWJ)
    }
}

property_enum! {
    /// `Sentence_Break` values from UAX #29.
    SentenceBreak, "sentence_break" {
        Other => "XX",
        CR => "CR",
        LF => "LF",
        Extend => "EX",
        Sep => "SE",
        Format => "FO",
        Sp => "SP",
        Lower => "LO",
        Upper => "UP",
        OLetter => "LE",
        Numeric => "NU",
        ATerm => "AT",
        SContinue => "SC",
        STerm => "ST",
        Close => "CL",
    }
}

impl SentenceBreak {
    pub(crate) const fn is_para_sep(self) -> bool {
        matches!(self, SentenceBreak::Sep | SentenceBreak::CR | SentenceBreak::LF)
    }
}

/// `Bidi_Paired_Bracket_Type` together with the paired bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedBracket {
    Open(char),
    Close(char),
}

static COMPILED: Lazy<Arc<PropertyTables>> = Lazy::new(|| {
    let (major, minor, micro) = unicode_linebreak::UNICODE_VERSION;
    Arc::new(PropertyTables {
        version: format!("{major}.{minor}.{micro}"),
        compiled: true,
        bidi: RangeMap::default(),
        line: RangeMap::default(),
        grapheme: RangeMap::default(),
        word: RangeMap::default(),
        sentence: RangeMap::default(),
    })
});

/// An immutable snapshot of the character properties.
///
/// Every lookup is total: unassigned code points resolve to the UCD
/// default for the property.
#[derive(Debug)]
pub struct PropertyTables {
    version: String,
    compiled: bool,
    bidi: RangeMap<BidiClass>,
    line: RangeMap<LineBreakClass>,
    grapheme: RangeMap<GraphemeClusterBreak>,
    word: RangeMap<WordBreak>,
    sentence: RangeMap<SentenceBreak>,
}

impl PropertyTables {
    /// The snapshot compiled into this binary.
    pub fn compiled() -> Arc<PropertyTables> {
        Arc::clone(&COMPILED)
    }

    pub(crate) fn from_document(doc: OverrideDocument) -> Result<Self, crate::DataError> {
        if doc.version.trim().is_empty() {
            return Err(crate::DataError::MissingVersion);
        }
        Ok(Self {
            version: doc.version,
            compiled: false,
            bidi: RangeMap::build(doc.bidi_class)?,
            line: RangeMap::build(doc.line_break)?,
            grapheme: RangeMap::build(doc.grapheme_cluster_break)?,
            word: RangeMap::build(doc.word_break)?,
            sentence: RangeMap::build(doc.sentence_break)?,
        })
    }

    /// Version string of the data in this snapshot.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether this is the compiled snapshot rather than a loaded one.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Number of override ranges layered over the compiled data.
    pub fn override_count(&self) -> usize {
        self.bidi.len() + self.line.len() + self.grapheme.len() + self.word.len() + self.sentence.len()
    }

    pub fn bidi_class(&self, c: char) -> BidiClass {
        self.bidi.get(c).unwrap_or_else(|| compiled::bidi_class(c))
    }

    pub fn line_break(&self, c: char) -> LineBreakClass {
        self.line.get(c).unwrap_or_else(|| compiled::line_break(c))
    }

    pub fn grapheme_cluster_break(&self, c: char) -> GraphemeClusterBreak {
        self.grapheme
            .get(c)
            .unwrap_or_else(|| compiled::grapheme_cluster_break(c))
    }

    pub fn word_break(&self, c: char) -> WordBreak {
        self.word.get(c).unwrap_or_else(|| compiled::word_break(c))
    }

    pub fn sentence_break(&self, c: char) -> SentenceBreak {
        self.sentence
            .get(c)
            .unwrap_or_else(|| compiled::sentence_break(c))
    }

    pub fn script(&self, c: char) -> Script {
        compiled::script(c)
    }

    pub fn paired_bracket(&self, c: char) -> Option<PairedBracket> {
        tables::paired_bracket(c)
    }

    /// `Bidi_Mirroring_Glyph`, if the character has one.
    pub fn mirroring_glyph(&self, c: char) -> Option<char> {
        tables::mirroring_glyph(c)
    }

    /// East Asian Width of F, W or H; only consulted by rule LB30.
    pub fn is_east_asian_wide(&self, c: char) -> bool {
        compiled::is_east_asian_wide(c)
    }
}
