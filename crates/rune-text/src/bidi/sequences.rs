//! Level runs and isolating run sequences (BD13, X10).

use super::level::Level;
use crate::properties::BidiClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IsolatingRunSequence {
    /// Paragraph-relative indices, in logical order, of the characters
    /// that survive X9.
    pub indices: Vec<usize>,
    pub level: Level,
    pub sos: BidiClass,
    pub eos: BidiClass,
}

/// Matching PDI of every isolate initiator that has one (BD9).
fn matching_pdis(original: &[BidiClass]) -> Vec<Option<usize>> {
    let mut matches = vec![None; original.len()];
    let mut open = Vec::new();
    for (i, class) in original.iter().enumerate() {
        if class.is_isolate_initiator() {
            open.push(i);
        } else if *class == BidiClass::PDI {
            if let Some(initiator) = open.pop() {
                matches[initiator] = Some(i);
            }
        }
    }
    matches
}

fn level_runs(original: &[BidiClass], levels: &[Level]) -> Vec<Vec<usize>> {
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current = None;
    for (i, class) in original.iter().enumerate() {
        if class.is_removed_by_x9() {
            continue;
        }
        match runs.last_mut() {
            Some(run) if current == Some(levels[i]) => run.push(i),
            _ => {
                runs.push(vec![i]);
                current = Some(levels[i]);
            }
        }
    }
    runs
}

fn direction_of(level: Level) -> BidiClass {
    if level.is_rtl() {
        BidiClass::R
    } else {
        BidiClass::L
    }
}

pub(crate) fn isolating_run_sequences(
    original: &[BidiClass],
    levels: &[Level],
    para_level: Level,
) -> Vec<IsolatingRunSequence> {
    let runs = level_runs(original, levels);
    let matches = matching_pdis(original);

    let mut run_starting_at = vec![None; original.len()];
    for (r, run) in runs.iter().enumerate() {
        if let Some(&first) = run.first() {
            run_starting_at[first] = Some(r);
        }
    }
    let mut is_matched_pdi = vec![false; original.len()];
    for pdi in matches.iter().flatten() {
        is_matched_pdi[*pdi] = true;
    }

    let mut sequences = Vec::new();
    for run in &runs {
        let Some(&first) = run.first() else { continue };
        if is_matched_pdi[first] {
            continue;
        }
        let mut indices = run.clone();
        while let Some(&last) = indices.last() {
            let next_run = matches[last]
                .filter(|_| original[last].is_isolate_initiator())
                .and_then(|pdi| run_starting_at[pdi]);
            match next_run {
                Some(r) => indices.extend_from_slice(&runs[r]),
                None => break,
            }
        }

        let (Some(&start), Some(&end)) = (indices.first(), indices.last()) else {
            continue;
        };
        let level = levels[start];
        let before = (0..start)
            .rev()
            .find(|&i| !original[i].is_removed_by_x9())
            .map_or(para_level, |i| levels[i]);
        let after = if original[end].is_isolate_initiator() {
            para_level
        } else {
            (end + 1..original.len())
                .find(|&i| !original[i].is_removed_by_x9())
                .map_or(para_level, |i| levels[i])
        };
        sequences.push(IsolatingRunSequence {
            indices,
            level,
            sos: direction_of(level.max(before)),
            eos: direction_of(level.max(after)),
        });
    }
    sequences
}
