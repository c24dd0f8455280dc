//! Sources of [`PropertyTables`] snapshots.

use std::path::PathBuf;
use std::sync::Arc;

use crate::properties::{OverrideDocument, PropertyTables};
use crate::DataError;

/// Supplies a property snapshot to the components of this crate.
pub trait DataProvider {
    fn load_properties(&self) -> Result<Arc<PropertyTables>, DataError>;
}

/// Hands out the snapshot compiled into the binary. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledDataProvider;

impl DataProvider for CompiledDataProvider {
    fn load_properties(&self) -> Result<Arc<PropertyTables>, DataError> {
        Ok(PropertyTables::compiled())
    }
}

#[derive(Debug, Clone)]
enum TomlSource {
    Path(PathBuf),
    Inline(String),
}

/// Builds a fresh snapshot from a TOML override document.
///
/// Each call to [`DataProvider::load_properties`] re-reads the source and
/// produces an independent snapshot.
#[derive(Debug, Clone)]
pub struct TomlDataProvider {
    source: TomlSource,
}

impl TomlDataProvider {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TomlSource::Path(path.into()),
        }
    }

    pub fn from_toml_str(document: impl Into<String>) -> Self {
        Self {
            source: TomlSource::Inline(document.into()),
        }
    }
}

impl DataProvider for TomlDataProvider {
    fn load_properties(&self) -> Result<Arc<PropertyTables>, DataError> {
        let content = match &self.source {
            TomlSource::Path(path) => std::fs::read_to_string(path)?,
            TomlSource::Inline(doc) => doc.clone(),
        };
        let doc: OverrideDocument = toml::from_str(&content)?;
        let tables = PropertyTables::from_document(doc)?;
        tracing::debug!(
            version = %tables.version(),
            overrides = tables.override_count(),
            "loaded property snapshot"
        );
        Ok(Arc::new(tables))
    }
}

/// An already loaded snapshot; lets several components share one load.
impl DataProvider for Arc<PropertyTables> {
    fn load_properties(&self) -> Result<Arc<PropertyTables>, DataError> {
        Ok(Arc::clone(self))
    }
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn load_properties(&self) -> Result<Arc<PropertyTables>, DataError> {
        (**self).load_properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::BidiClass;

    const PRIVATE_USE_RTL: &str = r#"
version = "15.0.0-pua"

[[bidi_class]]
start = 0xE000
end = 0xE0FF
class = "R"

[[word_break]]
start = 0x2D
class = "MidLetter"
"#;

    #[test]
    fn compiled_provider_returns_shared_snapshot() {
        let tables = CompiledDataProvider.load_properties().unwrap();
        assert!(Arc::ptr_eq(&tables, &PropertyTables::compiled()));
    }

    #[test]
    fn toml_provider_layers_overrides() {
        let tables = TomlDataProvider::from_toml_str(PRIVATE_USE_RTL)
            .load_properties()
            .unwrap();
        assert!(!tables.is_compiled());
        assert_eq!(tables.version(), "15.0.0-pua");
        assert_eq!(tables.override_count(), 2);
        assert_eq!(tables.bidi_class('\u{E010}'), BidiClass::R);
        // Untouched code points fall through to compiled data.
        assert_eq!(tables.bidi_class('a'), BidiClass::L);
        // The compiled snapshot is not affected.
        assert_eq!(PropertyTables::compiled().bidi_class('\u{E010}'), BidiClass::L);
    }

    #[test]
    fn toml_provider_reports_configuration_errors() {
        let err = TomlDataProvider::from_toml_str("version = \"\"")
            .load_properties()
            .unwrap_err();
        assert!(matches!(err, DataError::MissingVersion));

        let err = TomlDataProvider::from_toml_str("version = [")
            .load_properties()
            .unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));

        let err = TomlDataProvider::from_path("/nonexistent/rune-properties.toml")
            .load_properties()
            .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
