use core::ops::Range;
use std::borrow::Cow;
use std::sync::Arc;

use super::explicit::{self, ExplicitLevels};
use super::implicit;
use super::level::{Level, MAX_DEPTH};
use super::mirror::mirror_for_level;
use super::reorder::{self, BidiRun};
use super::sequences::isolating_run_sequences;
use crate::properties::{BidiClass, PropertyTables};
use crate::provider::DataProvider;
use crate::unicode::CodeUnits;
use crate::DataError;

/// Paragraph direction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphDirection {
    Ltr,
    Rtl,
    Mixed,
}

/// Resolves embedding levels (UAX #9) against one property snapshot.
#[derive(Debug, Clone)]
pub struct BidiResolver {
    tables: Arc<PropertyTables>,
}

impl Default for BidiResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BidiResolver {
    pub fn new() -> Self {
        Self {
            tables: PropertyTables::compiled(),
        }
    }

    pub fn try_new_with_provider<P: DataProvider + ?Sized>(provider: &P) -> Result<Self, DataError> {
        let tables = provider.load_properties()?;
        tracing::debug!(version = %tables.version(), "bidi resolver built from provider");
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &Arc<PropertyTables> {
        &self.tables
    }

    /// Resolve UTF-8 text. `base` forces the paragraph level of every
    /// paragraph; `None` detects it from the first strong character.
    pub fn resolve_str(&self, text: &str, base: Option<Level>) -> BidiInfo {
        self.resolve(text, base)
    }

    /// Resolve potentially ill-formed UTF-8. Offsets are byte offsets.
    pub fn resolve_utf8(&self, text: &[u8], base: Option<Level>) -> BidiInfo {
        self.resolve(text, base)
    }

    /// Resolve potentially ill-formed UTF-16. Offsets are 16-bit unit offsets.
    pub fn resolve_utf16(&self, text: &[u16], base: Option<Level>) -> BidiInfo {
        self.resolve(text, base)
    }

    fn resolve<Y: CodeUnits + ?Sized>(&self, text: &Y, base: Option<Level>) -> BidiInfo {
        let (offsets, chars): (Vec<usize>, Vec<char>) = text.code_points().unzip();
        let classes: Vec<BidiClass> = chars.iter().map(|&c| self.tables.bidi_class(c)).collect();
        let base = base.map(|level| {
            if level.number() > MAX_DEPTH {
                Level::LTR
            } else {
                level
            }
        });
        let unit_len = text.unit_len();

        let mut paragraphs = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = paragraph_end(&chars, &classes, start);
            let original = classes[start..end].to_vec();
            let (level, levels) = resolve_paragraph(&self.tables, &chars[start..end], &original, base);
            tracing::trace!(
                paragraph = paragraphs.len(),
                level = level.number(),
                chars = end - start,
                "resolved bidi paragraph"
            );
            let unit_end = offsets.get(end).copied().unwrap_or(unit_len);
            paragraphs.push(Paragraph {
                range: offsets[start]..unit_end,
                chars: start..end,
                level,
                levels,
                classes: original,
            });
            start = end;
        }

        BidiInfo {
            tables: Arc::clone(&self.tables),
            paragraphs,
            offsets,
            unit_len,
        }
    }
}

/// End of the paragraph starting at `start` (P1). CR LF is one separator.
fn paragraph_end(chars: &[char], classes: &[BidiClass], start: usize) -> usize {
    for i in start..chars.len() {
        if classes[i] == BidiClass::B {
            if chars[i] == '\r' && chars.get(i + 1) == Some(&'\n') {
                return i + 2;
            }
            return i + 1;
        }
    }
    chars.len()
}

fn resolve_paragraph(
    tables: &PropertyTables,
    chars: &[char],
    original: &[BidiClass],
    base: Option<Level>,
) -> (Level, Vec<Level>) {
    let para_level = base
        .or_else(|| explicit::first_strong_level(original, false))
        .unwrap_or(Level::LTR);

    let ExplicitLevels {
        mut levels,
        mut classes,
    } = explicit::resolve(original, para_level);

    for seq in isolating_run_sequences(original, &levels, para_level) {
        implicit::resolve_weak(&seq, &mut classes);
        implicit::resolve_brackets(tables, &seq, chars, original, &mut classes);
        implicit::resolve_neutral(&seq, &mut classes);
    }
    implicit::resolve_implicit(original, &classes, &mut levels);

    // Characters removed by X9 inherit the level before them.
    for i in 0..levels.len() {
        if original[i].is_removed_by_x9() {
            levels[i] = if i == 0 { para_level } else { levels[i - 1] };
        }
    }
    (para_level, levels)
}

/// Bidi information for a single paragraph.
#[derive(Debug, Clone)]
pub struct Paragraph {
    range: Range<usize>,
    chars: Range<usize>,
    level: Level,
    levels: Vec<Level>,
    classes: Vec<BidiClass>,
}

impl Paragraph {
    /// Code unit range of this paragraph within the input.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Code point range of this paragraph within the input.
    pub fn chars(&self) -> Range<usize> {
        self.chars.clone()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Resolved level of each code point, before any line-based rule.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Original bidi class of each code point.
    pub fn classes(&self) -> &[BidiClass] {
        &self.classes
    }

    pub fn direction(&self) -> ParagraphDirection {
        let rtl = self.levels.iter().filter(|l| l.is_rtl()).count();
        match rtl {
            0 => ParagraphDirection::Ltr,
            n if n == self.levels.len() => ParagraphDirection::Rtl,
            _ => ParagraphDirection::Mixed,
        }
    }

    fn clamp(&self, line: Range<usize>) -> Range<usize> {
        let end = line.end.min(self.levels.len());
        line.start.min(end)..end
    }

    /// Levels of the code points in `line` (paragraph-relative code point
    /// indices) after rule L1. Out-of-range lines are clamped.
    pub fn reordered_levels(&self, line: Range<usize>) -> Vec<Level> {
        let line = self.clamp(line);
        let mut levels = self.levels[line.clone()].to_vec();
        reorder::reset_line_levels(&self.classes[line], &mut levels, self.level);
        levels
    }

    /// Visual-to-logical map of `line`, indexed relative to the line start.
    pub fn visual_map(&self, line: Range<usize>) -> Vec<usize> {
        reorder::reorder_visual(&self.reordered_levels(line))
    }

    /// Level runs of `line` in visual order.
    pub fn visual_runs(&self, line: Range<usize>) -> Vec<BidiRun> {
        let line = self.clamp(line);
        let start = line.start;
        reorder::visual_runs(&self.reordered_levels(line), start)
    }
}

/// Resolved paragraphs of one input text.
#[derive(Debug, Clone)]
pub struct BidiInfo {
    tables: Arc<PropertyTables>,
    paragraphs: Vec<Paragraph>,
    offsets: Vec<usize>,
    unit_len: usize,
}

impl BidiInfo {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Code unit offset of each code point.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// One level per code point, across all paragraphs.
    pub fn levels(&self) -> Vec<Level> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.levels.iter().copied())
            .collect()
    }

    /// One level per code unit: multi-unit code points repeat their level.
    pub fn levels_per_code_unit(&self) -> Vec<Level> {
        let mut out = Vec::with_capacity(self.unit_len);
        for (cp, level) in self.levels().into_iter().enumerate() {
            let start = self.offsets[cp];
            let end = self.offsets.get(cp + 1).copied().unwrap_or(self.unit_len);
            out.extend(core::iter::repeat_n(level, end - start));
        }
        out
    }

    pub fn has_rtl(&self) -> bool {
        self.paragraphs
            .iter()
            .any(|p| p.levels.iter().any(|l| l.is_rtl()))
    }

    /// Render one line of the resolved `text` in visual order, mirroring
    /// characters at right-to-left levels (L4).
    ///
    /// `line` is a byte range inside paragraph `para`. Text without
    /// right-to-left content, or a line that does not match the resolved
    /// paragraph, is returned unchanged.
    pub fn reorder_line_str<'a>(
        &self,
        text: &'a str,
        para: usize,
        line: Range<usize>,
    ) -> Cow<'a, str> {
        let Some(slice) = text.get(line.clone()) else {
            return Cow::Borrowed("");
        };
        let Some(paragraph) = self.paragraphs.get(para) else {
            return Cow::Borrowed(slice);
        };
        let first = self.offsets.partition_point(|&o| o < line.start);
        let last = self.offsets.partition_point(|&o| o < line.end);
        let relative = first.saturating_sub(paragraph.chars.start)
            ..last.saturating_sub(paragraph.chars.start);

        let levels = paragraph.reordered_levels(relative);
        let chars: Vec<char> = slice.chars().collect();
        if chars.len() != levels.len() || levels.iter().all(|l| l.is_ltr()) {
            return Cow::Borrowed(slice);
        }

        let mut visual = String::with_capacity(slice.len());
        for logical in reorder::reorder_visual(&levels) {
            visual.push(mirror_for_level(&self.tables, chars[logical], levels[logical]));
        }
        Cow::Owned(visual)
    }
}
