use core::ops::Range;

use super::level::{Level, MAX_DEPTH};
use crate::properties::BidiClass;

/// A run of characters sharing one embedding level, in visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiRun {
    /// Code point range, relative to the start of the line's paragraph.
    pub range: Range<usize>,
    pub level: Level,
}

/// Computes the visual-to-logical index map for one line (rule L2).
///
/// `map[visual] == logical`. From the highest level down to the lowest odd
/// level, every maximal run at or above that level is reversed. Raw levels
/// above 125 count as level 0, so any input yields a permutation of
/// `0..levels.len()`.
pub fn reorder_visual<L: Copy + Into<u8>>(levels: &[L]) -> Vec<usize> {
    let levels: Vec<u8> = levels
        .iter()
        .map(|&level| {
            let raw = level.into();
            if raw > MAX_DEPTH { 0 } else { raw }
        })
        .collect();
    let mut map: Vec<usize> = (0..levels.len()).collect();

    let highest = levels.iter().copied().max();
    let lowest_odd = levels.iter().copied().filter(|l| l % 2 == 1).min();
    let (Some(highest), Some(lowest_odd)) = (highest, lowest_odd) else {
        return map;
    };

    for threshold in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < levels.len() {
            if levels[i] < threshold {
                i += 1;
                continue;
            }
            let start = i;
            while i < levels.len() && levels[i] >= threshold {
                i += 1;
            }
            map[start..i].reverse();
        }
    }
    map
}

/// Rule L1: resets segment and paragraph separators, and any whitespace or
/// isolate formatting characters before them or at the end of the line, to
/// the paragraph level. Characters removed by X9 inside such a sequence are
/// reset along with it.
pub(crate) fn reset_line_levels(original: &[BidiClass], levels: &mut [Level], para_level: Level) {
    let mut trailing = true;
    for (class, level) in original.iter().zip(levels.iter_mut()).rev() {
        match class {
            BidiClass::S | BidiClass::B => {
                *level = para_level;
                trailing = true;
            }
            BidiClass::WS | BidiClass::FSI | BidiClass::LRI | BidiClass::RLI | BidiClass::PDI
                if trailing =>
            {
                *level = para_level;
            }
            class if trailing && class.is_removed_by_x9() => *level = para_level,
            _ => trailing = false,
        }
    }
}

/// Groups a line's levels into runs listed in visual order. `offset` is the
/// paragraph-relative index of the line's first character.
pub(crate) fn visual_runs(levels: &[Level], offset: usize) -> Vec<BidiRun> {
    let map = reorder_visual(levels);
    let mut runs: Vec<BidiRun> = Vec::new();
    let mut prev: Option<usize> = None;
    for &logical in &map {
        let level = levels[logical];
        let continues = prev.is_some_and(|p| {
            levels[p] == level && (logical == p + 1 || logical + 1 == p)
        });
        let pos = offset + logical;
        match runs.last_mut() {
            Some(run) if continues => {
                run.range.start = run.range.start.min(pos);
                run.range.end = run.range.end.max(pos + 1);
            }
            _ => runs.push(BidiRun {
                range: pos..pos + 1,
                level,
            }),
        }
        prev = Some(logical);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(raw: &[u8]) -> Vec<Level> {
        raw.iter().copied().map(Level::new).collect()
    }

    #[test]
    fn reverses_single_rtl_run() {
        assert_eq!(reorder_visual(&[0u8, 0, 1, 1, 0]), vec![0, 1, 3, 2, 4]);
    }

    #[test]
    fn nested_levels_reverse_twice() {
        // An LTR number inside RTL text keeps its own order.
        assert_eq!(reorder_visual(&[1u8, 1, 2, 2, 1]), vec![4, 2, 3, 1, 0]);
    }

    #[test]
    fn all_even_levels_keep_logical_order() {
        assert_eq!(reorder_visual(&[0u8, 2, 2, 0]), vec![0, 1, 2, 3]);
        assert!(reorder_visual::<u8>(&[]).is_empty());
    }

    #[test]
    fn levels_above_max_depth_act_as_zero() {
        assert_eq!(reorder_visual(&[200u8, 1, 1, 255]), vec![0, 2, 1, 3]);
        assert_eq!(reorder_visual(&[126u8, 127, 128]), vec![0, 1, 2]);
    }

    #[test]
    fn arbitrary_levels_yield_permutations() {
        let mut raw: Vec<u8> = Vec::new();
        let mut seed = 7u32;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            raw.push((seed >> 16) as u8);
        }
        let mut map = reorder_visual(&raw);
        assert_eq!(map.len(), raw.len());
        map.sort_unstable();
        assert!(map.iter().copied().eq(0..raw.len()));
    }

    #[test]
    fn trailing_whitespace_resets_to_paragraph_level() {
        use BidiClass::*;
        let original = [R, WS, R, WS, S, R, WS];
        let mut resolved = levels(&[1, 1, 1, 1, 1, 1, 1]);
        reset_line_levels(&original, &mut resolved, Level::LTR);
        let raw: Vec<u8> = resolved.iter().map(|l| l.number()).collect();
        assert_eq!(raw, vec![1, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn runs_are_listed_in_visual_order() {
        let runs = visual_runs(&levels(&[0, 0, 1, 1, 0]), 10);
        assert_eq!(
            runs,
            vec![
                BidiRun { range: 10..12, level: Level::new(0) },
                BidiRun { range: 12..14, level: Level::new(1) },
                BidiRun { range: 14..15, level: Level::new(0) },
            ]
        );
    }
}
