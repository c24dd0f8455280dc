//! Curated data the compiled crates do not carry: bracket pairs, mirroring
//! glyphs and the loose line-breaking span. Range tables are sorted and
//! non-overlapping.

use super::PairedBracket;

pub(crate) type RangeTable = &'static [(u32, u32)];

pub(crate) fn contains(table: RangeTable, c: char) -> bool {
    let cp = c as u32;
    table
        .binary_search_by(|&(start, end)| {
            if end < cp {
                core::cmp::Ordering::Less
            } else if start > cp {
                core::cmp::Ordering::Greater
            } else {
                core::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Non-starters that loose line breaking lets lines start with.
pub(crate) const CJK_NON_STARTER_SPAN: RangeTable = &[(0x3000, 0x30FF), (0xFF00, 0xFFEF)];

/// `Bidi_Paired_Bracket` pairs, opening first, sorted by opening bracket.
const BRACKET_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('\u{0F3A}', '\u{0F3B}'),
    ('\u{0F3C}', '\u{0F3D}'),
    ('\u{169B}', '\u{169C}'),
    ('\u{2045}', '\u{2046}'),
    ('\u{207D}', '\u{207E}'),
    ('\u{208D}', '\u{208E}'),
    ('\u{2308}', '\u{2309}'),
    ('\u{230A}', '\u{230B}'),
    ('\u{2329}', '\u{232A}'),
    ('\u{2768}', '\u{2769}'),
    ('\u{276A}', '\u{276B}'),
    ('\u{276C}', '\u{276D}'),
    ('\u{276E}', '\u{276F}'),
    ('\u{2770}', '\u{2771}'),
    ('\u{2772}', '\u{2773}'),
    ('\u{2774}', '\u{2775}'),
    ('\u{27C5}', '\u{27C6}'),
    ('\u{27E6}', '\u{27E7}'),
    ('\u{27E8}', '\u{27E9}'),
    ('\u{27EA}', '\u{27EB}'),
    ('\u{27EC}', '\u{27ED}'),
    ('\u{27EE}', '\u{27EF}'),
    ('\u{2983}', '\u{2984}'),
    ('\u{2985}', '\u{2986}'),
    ('\u{2987}', '\u{2988}'),
    ('\u{2989}', '\u{298A}'),
    ('\u{298B}', '\u{298C}'),
    ('\u{298D}', '\u{2990}'),
    ('\u{298F}', '\u{298E}'),
    ('\u{2991}', '\u{2992}'),
    ('\u{2993}', '\u{2994}'),
    ('\u{2995}', '\u{2996}'),
    ('\u{2997}', '\u{2998}'),
    ('\u{29D8}', '\u{29D9}'),
    ('\u{29DA}', '\u{29DB}'),
    ('\u{29FC}', '\u{29FD}'),
    ('\u{2E22}', '\u{2E23}'),
    ('\u{2E24}', '\u{2E25}'),
    ('\u{2E26}', '\u{2E27}'),
    ('\u{2E28}', '\u{2E29}'),
    ('\u{2E55}', '\u{2E56}'),
    ('\u{2E57}', '\u{2E58}'),
    ('\u{2E59}', '\u{2E5A}'),
    ('\u{2E5B}', '\u{2E5C}'),
    ('\u{3008}', '\u{3009}'),
    ('\u{300A}', '\u{300B}'),
    ('\u{300C}', '\u{300D}'),
    ('\u{300E}', '\u{300F}'),
    ('\u{3010}', '\u{3011}'),
    ('\u{3014}', '\u{3015}'),
    ('\u{3016}', '\u{3017}'),
    ('\u{3018}', '\u{3019}'),
    ('\u{301A}', '\u{301B}'),
    ('\u{FE59}', '\u{FE5A}'),
    ('\u{FE5B}', '\u{FE5C}'),
    ('\u{FE5D}', '\u{FE5E}'),
    ('\u{FF08}', '\u{FF09}'),
    ('\u{FF3B}', '\u{FF3D}'),
    ('\u{FF5B}', '\u{FF5D}'),
    ('\u{FF5F}', '\u{FF60}'),
    ('\u{FF62}', '\u{FF63}'),
];

/// Mirrored characters that are not paired brackets.
const MIRRORED_SYMBOLS: &[(char, char)] = &[
    ('<', '>'),
    ('>', '<'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{00BB}', '\u{00AB}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{203A}', '\u{2039}'),
    ('\u{2264}', '\u{2265}'),
    ('\u{2265}', '\u{2264}'),
    ('\u{2266}', '\u{2267}'),
    ('\u{2267}', '\u{2266}'),
    ('\u{226A}', '\u{226B}'),
    ('\u{226B}', '\u{226A}'),
    ('\u{2282}', '\u{2283}'),
    ('\u{2283}', '\u{2282}'),
    ('\u{2286}', '\u{2287}'),
    ('\u{2287}', '\u{2286}'),
    ('\u{FF1C}', '\u{FF1E}'),
    ('\u{FF1E}', '\u{FF1C}'),
];

pub(crate) fn paired_bracket(c: char) -> Option<PairedBracket> {
    if let Ok(idx) = BRACKET_PAIRS.binary_search_by_key(&c, |&(open, _)| open) {
        return Some(PairedBracket::Open(BRACKET_PAIRS[idx].1));
    }
    BRACKET_PAIRS
        .iter()
        .find(|&&(_, close)| close == c)
        .map(|&(open, _)| PairedBracket::Close(open))
}

pub(crate) fn mirroring_glyph(c: char) -> Option<char> {
    match paired_bracket(c) {
        Some(PairedBracket::Open(close)) => Some(close),
        Some(PairedBracket::Close(open)) => Some(open),
        None => MIRRORED_SYMBOLS
            .iter()
            .find(|&&(from, _)| from == c)
            .map(|&(_, to)| to),
    }
}

/// Canonical equivalents among brackets (U+2329/U+232A decompose to
/// U+3008/U+3009).
pub(crate) fn canonical_bracket(c: char) -> char {
    match c {
        '\u{2329}' => '\u{3008}',
        '\u{232A}' => '\u{3009}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(table: RangeTable) {
        for window in table.windows(2) {
            assert!(window[0].1 < window[1].0, "{:X?} overlaps {:X?}", window[0], window[1]);
        }
        for &(start, end) in table {
            assert!(start <= end);
        }
    }

    #[test]
    fn tables_are_sorted_and_disjoint() {
        assert_sorted(CJK_NON_STARTER_SPAN);
        for window in BRACKET_PAIRS.windows(2) {
            assert!(window[0].0 < window[1].0);
        }
    }

    #[test]
    fn brackets_pair_both_ways() {
        assert_eq!(paired_bracket('('), Some(PairedBracket::Open(')')));
        assert_eq!(paired_bracket(')'), Some(PairedBracket::Close('(')));
        assert_eq!(paired_bracket('a'), None);
        assert_eq!(mirroring_glyph('«'), Some('»'));
        assert_eq!(mirroring_glyph('['), Some(']'));
    }
}
