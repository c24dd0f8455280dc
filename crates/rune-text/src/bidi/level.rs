//! Embedding levels and the level classification queries.

use core::fmt;

/// Deepest embedding level the algorithm produces (`max_depth` in UAX #9).
pub const MAX_DEPTH: u8 = 125;

/// A bidi embedding level.
///
/// Levels produced by the resolver never exceed [`MAX_DEPTH`]. A level built
/// from a raw caller value may hold anything; values above [`MAX_DEPTH`] are
/// treated as left-to-right by every query and by reordering.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    pub const LTR: Level = Level(0);
    pub const RTL: Level = Level(1);

    pub const fn new(raw: u8) -> Level {
        Level(raw)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn is_ltr(self) -> bool {
        is_left_to_right(self.0)
    }

    pub const fn is_rtl(self) -> bool {
        is_right_to_left(self.0)
    }

    /// Least even level greater than this one, if within [`MAX_DEPTH`].
    pub(crate) fn next_ltr(self) -> Option<Level> {
        let next = self.0.saturating_add(2) & !1;
        (next <= MAX_DEPTH).then_some(Level(next))
    }

    /// Least odd level greater than this one, if within [`MAX_DEPTH`].
    pub(crate) fn next_rtl(self) -> Option<Level> {
        let next = self.0.saturating_add(1) | 1;
        (next <= MAX_DEPTH).then_some(Level(next))
    }

    /// Raises the level by `amount`, saturating at [`MAX_DEPTH`].
    pub(crate) fn raise(self, amount: u8) -> Level {
        Level(self.0.saturating_add(amount).min(MAX_DEPTH))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl From<u8> for Level {
    fn from(raw: u8) -> Level {
        Level(raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Even levels and levels above [`MAX_DEPTH`] are left-to-right.
pub const fn is_left_to_right(level: u8) -> bool {
    level > MAX_DEPTH || level % 2 == 0
}

pub const fn is_right_to_left(level: u8) -> bool {
    !is_left_to_right(level)
}

/// Raw base level of a left-to-right paragraph, for use with the queries.
pub const fn base_left_to_right_level() -> u8 {
    Level::LTR.0
}

pub const fn base_right_to_left_level() -> u8 {
    Level::RTL.0
}

/// Paragraph base direction requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect from the first strong character.
    #[default]
    Auto,
    Ltr,
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(Level::LTR),
            BaseDirection::Rtl => Some(Level::RTL),
        }
    }
}
