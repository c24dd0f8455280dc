use thiserror::Error;

/// Why a locale identifier was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty locale identifier")]
    Empty,

    #[error("invalid language subtag `{0}`")]
    InvalidLanguage(String),

    #[error("invalid or misplaced subtag `{0}`")]
    InvalidSubtag(String),

    #[error("unsupported or malformed extension `{0}`")]
    InvalidExtension(String),

    #[error("duplicate variant `{0}`")]
    DuplicateVariant(String),
}
