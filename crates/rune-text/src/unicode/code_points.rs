use core::char::DecodeUtf16;
use core::iter::Copied;
use core::slice;
use core::str::CharIndices;

/// A sequence of code units that can be walked as code points.
///
/// Offsets reported by [`CodeUnits::code_points`] are code-unit offsets:
/// bytes for UTF-8 input, 16-bit units for UTF-16 input. Ill-formed input
/// never fails; each maximal ill-formed subpart decodes to U+FFFD at the
/// offset where it starts.
pub trait CodeUnits {
    type CodePoints<'a>: Iterator<Item = (usize, char)>
    where
        Self: 'a;

    fn code_points(&self) -> Self::CodePoints<'_>;

    /// Total length in code units.
    fn unit_len(&self) -> usize;
}

impl CodeUnits for str {
    type CodePoints<'a> = CharIndices<'a>;

    fn code_points(&self) -> CharIndices<'_> {
        self.char_indices()
    }

    fn unit_len(&self) -> usize {
        self.len()
    }
}

impl CodeUnits for [u8] {
    type CodePoints<'a> = Utf8CodePoints<'a>;

    fn code_points(&self) -> Utf8CodePoints<'_> {
        Utf8CodePoints {
            bytes: self,
            pos: 0,
        }
    }

    fn unit_len(&self) -> usize {
        self.len()
    }
}

impl CodeUnits for [u16] {
    type CodePoints<'a> = Utf16CodePoints<'a>;

    fn code_points(&self) -> Utf16CodePoints<'_> {
        Utf16CodePoints {
            inner: char::decode_utf16(self.iter().copied()),
            pos: 0,
        }
    }

    fn unit_len(&self) -> usize {
        self.len()
    }
}

/// Decodes potentially ill-formed UTF-8, substituting U+FFFD for each
/// maximal subpart of an ill-formed sequence.
#[derive(Debug, Clone)]
pub struct Utf8CodePoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Utf8CodePoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        let start = self.pos;
        let (c, len) = decode_utf8(self.bytes.get(start..)?)?;
        self.pos += len;
        Some((start, c))
    }
}

/// Decodes one code point from the front of `bytes`, returning it with the
/// number of bytes consumed.
fn decode_utf8(bytes: &[u8]) -> Option<(char, usize)> {
    let &lead = bytes.first()?;
    if lead < 0x80 {
        return Some((lead as char, 1));
    }
    // Trailing-byte count plus the allowed range of the first trailing byte.
    let (trailing, lower, upper) = match lead {
        0xC2..=0xDF => (1, 0x80, 0xBF),
        0xE0 => (2, 0xA0, 0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
        0xED => (2, 0x80, 0x9F),
        0xF0 => (3, 0x90, 0xBF),
        0xF1..=0xF3 => (3, 0x80, 0xBF),
        0xF4 => (3, 0x80, 0x8F),
        _ => return Some((char::REPLACEMENT_CHARACTER, 1)),
    };
    let mut cp = u32::from(lead) & (0x7F >> (trailing + 1));
    for k in 0..trailing {
        let (lo, hi) = if k == 0 { (lower, upper) } else { (0x80, 0xBF) };
        match bytes.get(1 + k) {
            Some(&b) if (lo..=hi).contains(&b) => cp = (cp << 6) | u32::from(b & 0x3F),
            _ => return Some((char::REPLACEMENT_CHARACTER, 1 + k)),
        }
    }
    let c = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
    Some((c, 1 + trailing))
}

/// Decodes potentially ill-formed UTF-16, substituting U+FFFD for each
/// unpaired surrogate.
#[derive(Debug, Clone)]
pub struct Utf16CodePoints<'a> {
    inner: DecodeUtf16<Copied<slice::Iter<'a, u16>>>,
    pos: usize,
}

impl Iterator for Utf16CodePoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        let start = self.pos;
        let (c, len) = match self.inner.next()? {
            Ok(c) => (c, c.len_utf16()),
            Err(_) => (char::REPLACEMENT_CHARACTER, 1),
        };
        self.pos += len;
        Some((start, c))
    }
}
