//! Weak types (W1-W7), paired brackets (N0), neutrals (N1, N2) and
//! implicit levels (I1, I2).

use super::level::Level;
use super::sequences::IsolatingRunSequence;
use crate::properties::tables::canonical_bracket;
use crate::properties::{BidiClass, PairedBracket, PropertyTables};

use BidiClass::*;

/// Depth of the BD16 bracket stack.
const BRACKET_STACK_DEPTH: usize = 63;

fn embedding_direction(level: Level) -> BidiClass {
    if level.is_rtl() { R } else { L }
}

/// Direction a resolved class contributes to N0 and N1 (numbers count as R).
fn strong_direction(class: BidiClass) -> Option<BidiClass> {
    match class {
        L => Some(L),
        R | AL | EN | AN => Some(R),
        _ => None,
    }
}

fn is_neutral_or_isolate(class: BidiClass) -> bool {
    matches!(class, B | S | WS | ON | BN | LRI | RLI | FSI | PDI)
}

pub(crate) fn resolve_weak(seq: &IsolatingRunSequence, classes: &mut [BidiClass]) {
    let idx = &seq.indices;

    // W1
    let mut prev = seq.sos;
    for &i in idx {
        if classes[i] == NSM {
            classes[i] = if prev.is_isolate_initiator() || prev == PDI {
                ON
            } else {
                prev
            };
        }
        prev = classes[i];
    }

    // W2, W3
    let mut last_strong = seq.sos;
    for &i in idx {
        match classes[i] {
            L | R => last_strong = classes[i],
            AL => {
                last_strong = AL;
                classes[i] = R;
            }
            EN if last_strong == AL => classes[i] = AN,
            _ => {}
        }
    }

    // W4
    for k in 1..idx.len().saturating_sub(1) {
        let (before, after) = (classes[idx[k - 1]], classes[idx[k + 1]]);
        match classes[idx[k]] {
            ES if before == EN && after == EN => classes[idx[k]] = EN,
            CS if before == after && matches!(before, EN | AN) => classes[idx[k]] = before,
            _ => {}
        }
    }

    // W5
    let mut k = 0;
    while k < idx.len() {
        if classes[idx[k]] != ET {
            k += 1;
            continue;
        }
        let start = k;
        while k < idx.len() && classes[idx[k]] == ET {
            k += 1;
        }
        let touches_number = (start > 0 && classes[idx[start - 1]] == EN)
            || (k < idx.len() && classes[idx[k]] == EN);
        if touches_number {
            for &i in &idx[start..k] {
                classes[i] = EN;
            }
        }
    }

    // W6
    for &i in idx {
        if matches!(classes[i], ES | ET | CS) {
            classes[i] = ON;
        }
    }

    // W7
    let mut last_strong = seq.sos;
    for &i in idx {
        match classes[i] {
            L | R => last_strong = classes[i],
            EN if last_strong == L => classes[i] = L,
            _ => {}
        }
    }
}

/// Bracket pairs of the sequence as positions into `seq.indices` (BD16),
/// sorted by opening position.
fn bracket_pairs(
    tables: &PropertyTables,
    seq: &IsolatingRunSequence,
    chars: &[char],
    classes: &[BidiClass],
) -> Vec<(usize, usize)> {
    let mut stack: Vec<(char, usize)> = Vec::with_capacity(BRACKET_STACK_DEPTH);
    let mut pairs = Vec::new();
    for (k, &i) in seq.indices.iter().enumerate() {
        if classes[i] != ON {
            continue;
        }
        match tables.paired_bracket(chars[i]) {
            Some(PairedBracket::Open(close)) => {
                if stack.len() == BRACKET_STACK_DEPTH {
                    break;
                }
                stack.push((canonical_bracket(close), k));
            }
            Some(PairedBracket::Close(_)) => {
                let close = canonical_bracket(chars[i]);
                if let Some(pos) = stack.iter().rposition(|&(c, _)| c == close) {
                    pairs.push((stack[pos].1, k));
                    stack.truncate(pos);
                }
            }
            None => {}
        }
    }
    pairs.sort_unstable();
    pairs
}

pub(crate) fn resolve_brackets(
    tables: &PropertyTables,
    seq: &IsolatingRunSequence,
    chars: &[char],
    original: &[BidiClass],
    classes: &mut [BidiClass],
) {
    let idx = &seq.indices;
    let embedding = embedding_direction(seq.level);

    for (open, close) in bracket_pairs(tables, seq, chars, classes) {
        let mut found_embedding = false;
        let mut found_opposite = false;
        for &i in &idx[open + 1..close] {
            match strong_direction(classes[i]) {
                Some(dir) if dir == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            let context = idx[..open]
                .iter()
                .rev()
                .find_map(|&i| strong_direction(classes[i]))
                .unwrap_or(seq.sos);
            if context == embedding { embedding } else { context }
        } else {
            continue;
        };

        for bracket in [open, close] {
            classes[idx[bracket]] = resolved;
            for &i in &idx[bracket + 1..] {
                if original[i] != NSM {
                    break;
                }
                classes[i] = resolved;
            }
        }
    }
}

pub(crate) fn resolve_neutral(seq: &IsolatingRunSequence, classes: &mut [BidiClass]) {
    let idx = &seq.indices;
    let embedding = embedding_direction(seq.level);

    let mut k = 0;
    while k < idx.len() {
        if !is_neutral_or_isolate(classes[idx[k]]) {
            k += 1;
            continue;
        }
        let start = k;
        while k < idx.len() && is_neutral_or_isolate(classes[idx[k]]) {
            k += 1;
        }
        let before = match start {
            0 => Some(seq.sos),
            _ => strong_direction(classes[idx[start - 1]]),
        };
        let after = match idx.get(k) {
            None => Some(seq.eos),
            Some(&i) => strong_direction(classes[i]),
        };
        let resolved = match (before, after) {
            (Some(b), Some(a)) if b == a => b,
            _ => embedding,
        };
        for &i in &idx[start..k] {
            classes[i] = resolved;
        }
    }
}

/// Applies I1 and I2 to every character that survives X9.
pub(crate) fn resolve_implicit(
    original: &[BidiClass],
    classes: &[BidiClass],
    levels: &mut [Level],
) {
    for (i, level) in levels.iter_mut().enumerate() {
        if original[i].is_removed_by_x9() {
            continue;
        }
        let raise = match (level.is_rtl(), classes[i]) {
            (false, R) => 1,
            (false, AN | EN) => 2,
            (true, L | EN | AN) => 1,
            _ => 0,
        };
        *level = level.raise(raise);
    }
}
