//! Error types for loading property data.

use thiserror::Error;

/// Result type for data loading.
pub type Result<T> = std::result::Result<T, DataError>;

/// Configuration errors raised while building a property snapshot.
///
/// These only surface at construction time; once a component exists, every
/// per-call operation is total.
#[derive(Error, Debug)]
pub enum DataError {
    /// The override source could not be read.
    #[error("failed to read property data: {0}")]
    Io(#[from] std::io::Error),

    /// The override source is not valid TOML or has the wrong shape.
    #[error("failed to parse property data: {0}")]
    Parse(#[from] toml::de::Error),

    /// A class name is not a value of the named property.
    #[error("unknown {property} value `{name}`")]
    UnknownClass { property: &'static str, name: String },

    /// A range is inverted or reaches past U+10FFFF.
    #[error("invalid {property} range {start:#06X}..={end:#06X}")]
    InvalidRange {
        property: &'static str,
        start: u32,
        end: u32,
    },

    /// Two ranges of the same property overlap.
    #[error("overlapping {property} ranges at {start:#06X}")]
    OverlappingRanges { property: &'static str, start: u32 },

    /// The snapshot does not declare a version.
    #[error("property data has no version")]
    MissingVersion,
}
