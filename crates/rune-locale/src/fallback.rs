use crate::locale::UND;
use crate::Locale;

/// Which subtag fallback gives up first once keywords and variants are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FallbackPriority {
    /// Drop the region, then the script, then the language.
    #[default]
    RegionFirst,
    /// Drop the script, then the language, then the region.
    LanguageFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleFallbackConfig {
    pub priority: FallbackPriority,
}

/// Derives chains of progressively more general locales.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFallbacker {
    config: LocaleFallbackConfig,
}

impl LocaleFallbacker {
    pub fn new(config: LocaleFallbackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> LocaleFallbackConfig {
        self.config
    }

    /// Starts a chain at `locale`. The first item is `locale` itself and the
    /// last is `und`.
    pub fn fallback_for(&self, locale: Locale) -> LocaleFallbackIterator {
        tracing::trace!(
            locale = %locale,
            priority = ?self.config.priority,
            "locale fallback started"
        );
        LocaleFallbackIterator {
            next: Some(locale),
            priority: self.config.priority,
        }
    }
}

/// Yields one fallback step per item; every step removes at least one
/// subtag, so a chain has at most `subtag_count() + 1` items.
#[derive(Debug, Clone)]
pub struct LocaleFallbackIterator {
    next: Option<Locale>,
    priority: FallbackPriority,
}

impl LocaleFallbackIterator {
    /// The locale the next call to `next` returns, if any.
    pub fn peek(&self) -> Option<&Locale> {
        self.next.as_ref()
    }
}

fn step(current: &Locale, priority: FallbackPriority) -> Option<Locale> {
    if current.is_und() {
        return None;
    }
    let mut parent = current.clone();
    if !parent.keywords.is_empty() {
        parent.keywords.clear();
    } else if !parent.variants.is_empty() {
        parent.variants.clear();
    } else {
        match priority {
            FallbackPriority::RegionFirst => {
                if parent.region.take().is_none() && parent.script.take().is_none() {
                    parent.language = UND.to_string();
                }
            }
            FallbackPriority::LanguageFirst => {
                if parent.script.take().is_none() {
                    if parent.language != UND {
                        parent.language = UND.to_string();
                    } else {
                        parent.region = None;
                    }
                }
            }
        }
    }
    Some(parent)
}

impl Iterator for LocaleFallbackIterator {
    type Item = Locale;

    fn next(&mut self) -> Option<Locale> {
        let current = self.next.take()?;
        self.next = step(&current, self.priority);
        Some(current)
    }
}

impl std::iter::FusedIterator for LocaleFallbackIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(tag: &str, priority: FallbackPriority) -> Vec<String> {
        LocaleFallbacker::new(LocaleFallbackConfig { priority })
            .fallback_for(tag.parse().unwrap())
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn region_first() {
        assert_eq!(
            chain("zh-Hant-TW", FallbackPriority::RegionFirst),
            ["zh-Hant-TW", "zh-Hant", "zh", "und"]
        );
        assert_eq!(
            chain("en-US-posix-u-ca-gregory", FallbackPriority::RegionFirst),
            ["en-US-posix-u-ca-gregory", "en-US-posix", "en-US", "en", "und"]
        );
    }

    #[test]
    fn language_first() {
        assert_eq!(
            chain("zh-Hant-TW", FallbackPriority::LanguageFirst),
            ["zh-Hant-TW", "zh-TW", "und-TW", "und"]
        );
        assert_eq!(
            chain("sr-Latn", FallbackPriority::LanguageFirst),
            ["sr-Latn", "sr", "und"]
        );
    }

    #[test]
    fn und_yields_itself_once() {
        for priority in [FallbackPriority::RegionFirst, FallbackPriority::LanguageFirst] {
            assert_eq!(chain("und", priority), ["und"]);
        }
        let mut iter = LocaleFallbacker::default().fallback_for(Locale::und());
        assert_eq!(iter.next(), Some(Locale::und()));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn chains_are_bounded_and_end_in_und() {
        let tags = [
            "en",
            "und-Latn",
            "und-419",
            "de-CH-1996-u-co-phonebk",
            "sl-Latn-IT-rozaj-biske",
            "yue-Hant-HK",
        ];
        for tag in tags {
            let start: Locale = tag.parse().unwrap();
            for priority in [FallbackPriority::RegionFirst, FallbackPriority::LanguageFirst] {
                let items: Vec<Locale> = LocaleFallbacker::new(LocaleFallbackConfig { priority })
                    .fallback_for(start.clone())
                    .collect();
                assert_eq!(items[0], start);
                assert!(items.last().unwrap().is_und(), "{tag} {priority:?}");
                assert!(items.len() <= start.subtag_count() + 1, "{tag} {priority:?}");
            }
        }
    }

    #[test]
    fn start_locale_is_not_mutated() {
        let start: Locale = "fr-CA".parse().unwrap();
        let fallbacker = LocaleFallbacker::default();
        let first: Vec<Locale> = fallbacker.fallback_for(start.clone()).collect();
        let second: Vec<Locale> = fallbacker.fallback_for(start.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(start.to_string(), "fr-CA");
    }
}
