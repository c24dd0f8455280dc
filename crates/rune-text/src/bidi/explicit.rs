//! Paragraph level detection (P2, P3) and explicit levels (X1 through X8).

use super::level::{Level, MAX_DEPTH};
use crate::properties::BidiClass;

/// Level implied by the first strong character, skipping isolated content.
///
/// With `stop_at_pdi`, scanning ends at the first PDI that closes an isolate
/// opened before `classes`, which is how FSI resolves its direction.
pub(crate) fn first_strong_level(classes: &[BidiClass], stop_at_pdi: bool) -> Option<Level> {
    let mut isolates = 0usize;
    for &class in classes {
        match class {
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => isolates += 1,
            BidiClass::PDI if isolates > 0 => isolates -= 1,
            BidiClass::PDI if stop_at_pdi => return None,
            BidiClass::L if isolates == 0 => return Some(Level::LTR),
            BidiClass::R | BidiClass::AL if isolates == 0 => return Some(Level::RTL),
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, Copy)]
struct Status {
    level: Level,
    override_class: Option<BidiClass>,
    isolate: bool,
}

/// Explicit levels of one paragraph.
#[derive(Debug)]
pub(crate) struct ExplicitLevels {
    pub levels: Vec<Level>,
    /// Classes after directional overrides, as W1 onwards sees them.
    pub classes: Vec<BidiClass>,
}

/// Applies X1 through X8 to a paragraph.
///
/// Entries for characters removed by X9 are left at the embedding level in
/// effect; the caller reassigns them once implicit levels are known.
pub(crate) fn resolve(original: &[BidiClass], para_level: Level) -> ExplicitLevels {
    let mut levels = vec![para_level; original.len()];
    let mut classes = original.to_vec();

    let mut stack: Vec<Status> = Vec::with_capacity(MAX_DEPTH as usize + 2);
    stack.push(Status {
        level: para_level,
        override_class: None,
        isolate: false,
    });
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    for (i, &class) in original.iter().enumerate() {
        let Some(&last) = stack.last() else { break };
        match class {
            BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO => {
                levels[i] = last.level;
                let rtl = matches!(class, BidiClass::RLE | BidiClass::RLO);
                let next = if rtl {
                    last.level.next_rtl()
                } else {
                    last.level.next_ltr()
                };
                match next {
                    Some(level) if overflow_isolates == 0 && overflow_embeddings == 0 => {
                        let override_class = match class {
                            BidiClass::RLO => Some(BidiClass::R),
                            BidiClass::LRO => Some(BidiClass::L),
                            _ => None,
                        };
                        stack.push(Status {
                            level,
                            override_class,
                            isolate: false,
                        });
                    }
                    _ => {
                        if overflow_isolates == 0 {
                            overflow_embeddings += 1;
                        }
                    }
                }
            }
            BidiClass::RLI | BidiClass::LRI | BidiClass::FSI => {
                levels[i] = last.level;
                if let Some(forced) = last.override_class {
                    classes[i] = forced;
                }
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => first_strong_level(&original[i + 1..], true) == Some(Level::RTL),
                };
                let next = if rtl {
                    last.level.next_rtl()
                } else {
                    last.level.next_ltr()
                };
                match next {
                    Some(level) if overflow_isolates == 0 && overflow_embeddings == 0 => {
                        valid_isolates += 1;
                        stack.push(Status {
                            level,
                            override_class: None,
                            isolate: true,
                        });
                    }
                    _ => overflow_isolates += 1,
                }
            }
            BidiClass::PDI => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embeddings = 0;
                    while stack.last().is_some_and(|s| !s.isolate) {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let current = stack.last().copied().unwrap_or(last);
                levels[i] = current.level;
                if let Some(forced) = current.override_class {
                    classes[i] = forced;
                }
            }
            BidiClass::PDF => {
                levels[i] = last.level;
                if overflow_isolates == 0 {
                    if overflow_embeddings > 0 {
                        overflow_embeddings -= 1;
                    } else if !last.isolate && stack.len() >= 2 {
                        stack.pop();
                    }
                }
            }
            BidiClass::B => levels[i] = para_level,
            BidiClass::BN => levels[i] = last.level,
            _ => {
                levels[i] = last.level;
                if let Some(forced) = last.override_class {
                    classes[i] = forced;
                }
            }
        }
    }

    ExplicitLevels { levels, classes }
}
