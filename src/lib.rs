//! rune-intl: bidirectional text, segmentation and locale fallback.
//!
//! [`Intl`] builds every component from one [`IntlConfig`] and a single
//! property snapshot shared between them. The component crates can also be
//! used directly:
//!
//! - [`rune_text`]: property tables, the bidi algorithm and segmenters
//! - [`rune_locale`]: locale identifiers and fallback
//! - [`rune_config`]: `rune.toml` loading

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub use rune_config::{self, ConfigError, IntlConfig};
pub use rune_locale::{self, Locale, LocaleFallbackConfig, LocaleFallbacker, ParseError};
pub use rune_text::{self, DataError, PropertyTables};

use rune_config::{DefaultDirection, FallbackOrder, LineStrictness, LineWordOption};
use rune_locale::FallbackPriority;
use rune_text::bidi::{BaseDirection, BidiInfo, BidiResolver};
use rune_text::segmenter::{
    GraphemeClusterSegmenter, LineBreakOptions, LineBreakStrictness, LineBreakWordOption,
    LineSegmenter, SentenceSegmenter, WordBreakOptions, WordSegmenter,
};
use rune_text::{CompiledDataProvider, DataProvider, TomlDataProvider};

#[derive(Error, Debug)]
pub enum IntlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("property data: {0}")]
    Data(#[from] DataError),

    #[error("content locale: {0}")]
    Locale(#[from] ParseError),
}

/// Every text component, built from one configuration.
#[derive(Debug, Clone)]
pub struct Intl {
    tables: Arc<PropertyTables>,
    base_direction: BaseDirection,
    bidi: BidiResolver,
    grapheme: GraphemeClusterSegmenter,
    word: WordSegmenter,
    sentence: SentenceSegmenter,
    line: LineSegmenter,
    fallbacker: LocaleFallbacker,
}

impl Default for Intl {
    fn default() -> Self {
        Self::new()
    }
}

fn base_direction(setting: DefaultDirection) -> BaseDirection {
    match setting {
        DefaultDirection::Auto => BaseDirection::Auto,
        DefaultDirection::Ltr => BaseDirection::Ltr,
        DefaultDirection::Rtl => BaseDirection::Rtl,
    }
}

fn line_options(config: &IntlConfig) -> LineBreakOptions {
    LineBreakOptions {
        strictness: match config.line.strictness {
            LineStrictness::Loose => LineBreakStrictness::Loose,
            LineStrictness::Normal => LineBreakStrictness::Normal,
            LineStrictness::Strict => LineBreakStrictness::Strict,
            LineStrictness::Anywhere => LineBreakStrictness::Anywhere,
        },
        word_option: match config.line.word_option {
            LineWordOption::Normal => LineBreakWordOption::Normal,
            LineWordOption::BreakAll => LineBreakWordOption::BreakAll,
            LineWordOption::KeepAll => LineBreakWordOption::KeepAll,
        },
    }
}

fn fallback_priority(setting: FallbackOrder) -> FallbackPriority {
    match setting {
        FallbackOrder::RegionFirst => FallbackPriority::RegionFirst,
        FallbackOrder::LanguageFirst => FallbackPriority::LanguageFirst,
    }
}

impl Intl {
    /// Components over the compiled property data with default settings.
    pub fn new() -> Self {
        Self {
            tables: PropertyTables::compiled(),
            base_direction: BaseDirection::Auto,
            bidi: BidiResolver::new(),
            grapheme: GraphemeClusterSegmenter::new(),
            word: WordSegmenter::new(),
            sentence: SentenceSegmenter::new(),
            line: LineSegmenter::new(),
            fallbacker: LocaleFallbacker::default(),
        }
    }

    /// Loads `rune.toml` (falling back to defaults) plus environment
    /// overrides, then builds the components.
    pub fn load() -> Result<Self, IntlError> {
        Self::from_config(&IntlConfig::load())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IntlError> {
        Self::from_config(&IntlConfig::load_from_file(path)?)
    }

    /// Builds every component. Property data is loaded once; a bad override
    /// file or content locale fails the whole construction.
    pub fn from_config(config: &IntlConfig) -> Result<Self, IntlError> {
        let tables = match &config.properties.overrides {
            Some(path) => TomlDataProvider::from_path(path).load_properties()?,
            None => CompiledDataProvider.load_properties()?,
        };
        let content_locale = config
            .word
            .content_locale
            .as_deref()
            .map(str::parse::<Locale>)
            .transpose()?;
        let fallback = LocaleFallbackConfig {
            priority: fallback_priority(config.fallback.priority),
        };

        let intl = Self {
            base_direction: base_direction(config.bidi.default_direction),
            bidi: BidiResolver::try_new_with_provider(&tables)?,
            grapheme: GraphemeClusterSegmenter::try_new_with_provider(&tables)?,
            word: WordSegmenter::try_new_with_provider(&tables, WordBreakOptions { content_locale })?,
            sentence: SentenceSegmenter::try_new_with_provider(&tables)?,
            line: LineSegmenter::try_new_with_provider(&tables, line_options(config))?,
            fallbacker: LocaleFallbacker::new(fallback),
            tables,
        };
        tracing::debug!(
            version = %intl.tables.version(),
            base_direction = ?intl.base_direction,
            "intl components ready"
        );
        Ok(intl)
    }

    /// The property snapshot every component shares.
    pub fn tables(&self) -> &Arc<PropertyTables> {
        &self.tables
    }

    pub fn base_direction(&self) -> BaseDirection {
        self.base_direction
    }

    /// Resolves `text` using the configured default direction.
    pub fn resolve_bidi(&self, text: &str) -> BidiInfo {
        self.bidi.resolve_str(text, self.base_direction.to_level())
    }

    pub fn bidi(&self) -> &BidiResolver {
        &self.bidi
    }

    pub fn grapheme(&self) -> &GraphemeClusterSegmenter {
        &self.grapheme
    }

    pub fn word(&self) -> &WordSegmenter {
        &self.word
    }

    pub fn sentence(&self) -> &SentenceSegmenter {
        &self.sentence
    }

    pub fn line(&self) -> &LineSegmenter {
        &self.line
    }

    pub fn fallbacker(&self) -> &LocaleFallbacker {
        &self.fallbacker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_share_one_snapshot() {
        let intl = Intl::from_config(&IntlConfig::default()).unwrap();
        assert!(Arc::ptr_eq(intl.tables(), &PropertyTables::compiled()));
        assert!(Arc::ptr_eq(intl.bidi().tables(), intl.tables()));
    }

    #[test]
    fn maps_config_settings() {
        let mut config = IntlConfig::default();
        config.bidi.default_direction = DefaultDirection::Rtl;
        config.line.strictness = LineStrictness::Anywhere;
        config.line.word_option = LineWordOption::KeepAll;
        config.fallback.priority = FallbackOrder::LanguageFirst;

        let intl = Intl::from_config(&config).unwrap();
        assert_eq!(intl.base_direction(), BaseDirection::Rtl);
        assert_eq!(
            intl.line().options(),
            LineBreakOptions {
                strictness: LineBreakStrictness::Anywhere,
                word_option: LineBreakWordOption::KeepAll,
            }
        );
        assert_eq!(intl.fallbacker().config().priority, FallbackPriority::LanguageFirst);
        assert!(intl.resolve_bidi("abc").paragraphs()[0].level().is_rtl());
    }

    #[test]
    fn invalid_content_locale_fails_construction() {
        let mut config = IntlConfig::default();
        config.word.content_locale = Some("s".to_string());
        assert!(matches!(
            Intl::from_config(&config),
            Err(IntlError::Locale(ParseError::InvalidLanguage(_)))
        ));
    }

    #[test]
    fn missing_override_file_fails_construction() {
        let mut config = IntlConfig::default();
        config.properties.overrides = Some("/nonexistent/overrides.toml".into());
        assert!(matches!(
            Intl::from_config(&config),
            Err(IntlError::Data(DataError::Io(_)))
        ));
    }
}
