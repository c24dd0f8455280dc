//! rune-locale: locale identifiers and locale fallback.
//!
//! [`Locale`] parses BCP-47 style identifiers into a canonical form.
//! [`LocaleFallbacker`] derives progressively more general locales from a
//! starting one, always ending in `und`.

mod error;
mod fallback;
mod locale;

pub use error::ParseError;
pub use fallback::{FallbackPriority, LocaleFallbackConfig, LocaleFallbackIterator, LocaleFallbacker};
pub use locale::Locale;
