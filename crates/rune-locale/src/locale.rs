use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

use crate::ParseError;

pub(crate) const UND: &str = "und";

/// A parsed locale identifier in canonical form.
///
/// Language is lowercase, script Titlecase, region uppercase and variants
/// lowercase and sorted. Only Unicode (`-u-`) extension keywords are kept,
/// sorted by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    pub(crate) language: String,
    pub(crate) script: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) variants: Vec<String>,
    pub(crate) keywords: Vec<(String, String)>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::und()
    }
}

impl Locale {
    /// The undetermined (root) locale.
    pub fn und() -> Self {
        Self {
            language: UND.to_string(),
            script: None,
            region: None,
            variants: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// True for bare `und`, the last item of every fallback chain.
    pub fn is_und(&self) -> bool {
        self.language == UND && self.subtag_count() == 0
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn keywords(&self) -> &[(String, String)] {
        &self.keywords
    }

    pub fn keyword(&self, key: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Number of subtags fallback can still remove. A `und` language does
    /// not count and the keyword set counts once.
    pub fn subtag_count(&self) -> usize {
        usize::from(self.language != UND)
            + usize::from(self.script.is_some())
            + usize::from(self.region.is_some())
            + self.variants.len()
            + usize::from(!self.keywords.is_empty())
    }
}

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_alnum(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_language(s: &str) -> bool {
    matches!(s.len(), 2..=3 | 5..=8) && is_alpha(s)
}

fn is_script(s: &str) -> bool {
    s.len() == 4 && is_alpha(s)
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(s: &str) -> bool {
    match s.len() {
        5..=8 => is_alnum(s),
        4 => s.as_bytes()[0].is_ascii_digit() && is_alnum(s),
        _ => false,
    }
}

fn is_key(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphanumeric() && b[1].is_ascii_alphabetic()
}

fn is_type(s: &str) -> bool {
    (3..=8).contains(&s.len()) && is_alnum(s)
}

fn titlecase(s: &str) -> String {
    let mut out = s.to_ascii_lowercase();
    out[..1].make_ascii_uppercase();
    out
}

fn push_keyword(
    keywords: &mut Vec<(String, String)>,
    key: String,
    value: &[String],
) -> Result<(), ParseError> {
    if keywords.iter().any(|(k, _)| *k == key) {
        return Err(ParseError::InvalidExtension(key));
    }
    let value = if value.is_empty() {
        "true".to_string()
    } else {
        value.join("-")
    };
    keywords.push((key, value));
    Ok(())
}

/// Consumes the subtags of a `-u-` extension up to the next singleton.
fn parse_unicode_extension<'a, I>(
    subtags: &mut Peekable<I>,
    keywords: &mut Vec<(String, String)>,
) -> Result<(), ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut key: Option<String> = None;
    let mut value = Vec::new();
    while let Some(&subtag) = subtags.peek() {
        if subtag.len() == 1 {
            break;
        }
        subtags.next();
        if is_key(subtag) {
            if let Some(done) = key.take() {
                push_keyword(keywords, done, &value)?;
                value.clear();
            }
            key = Some(subtag.to_ascii_lowercase());
        } else if key.is_some() && is_type(subtag) {
            value.push(subtag.to_ascii_lowercase());
        } else {
            // Attributes and malformed subtags.
            return Err(ParseError::InvalidExtension(subtag.to_string()));
        }
    }
    match key {
        Some(done) => push_keyword(keywords, done, &value),
        None => Err(ParseError::InvalidExtension("u".to_string())),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Expect {
    Script,
    Region,
    Variant,
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut subtags = s.split(['-', '_']).peekable();
        let Some(first) = subtags.next() else {
            return Err(ParseError::Empty);
        };

        let mut locale = Locale::und();
        if !first.eq_ignore_ascii_case("root") {
            if !is_language(first) {
                return Err(ParseError::InvalidLanguage(first.to_string()));
            }
            locale.language = first.to_ascii_lowercase();
        }

        let mut expect = Expect::Script;
        let mut seen_unicode_ext = false;
        while let Some(subtag) = subtags.next() {
            if subtag.len() == 1 {
                if !subtag.eq_ignore_ascii_case("u") || seen_unicode_ext {
                    return Err(ParseError::InvalidExtension(subtag.to_string()));
                }
                seen_unicode_ext = true;
                parse_unicode_extension(&mut subtags, &mut locale.keywords)?;
                continue;
            }
            if seen_unicode_ext {
                return Err(ParseError::InvalidSubtag(subtag.to_string()));
            }
            if expect == Expect::Script && is_script(subtag) {
                locale.script = Some(titlecase(subtag));
                expect = Expect::Region;
            } else if expect <= Expect::Region && is_region(subtag) {
                locale.region = Some(subtag.to_ascii_uppercase());
                expect = Expect::Variant;
            } else if is_variant(subtag) {
                let variant = subtag.to_ascii_lowercase();
                if locale.variants.contains(&variant) {
                    return Err(ParseError::DuplicateVariant(variant));
                }
                locale.variants.push(variant);
                expect = Expect::Variant;
            } else {
                return Err(ParseError::InvalidSubtag(subtag.to_string()));
            }
        }

        locale.variants.sort();
        locale.keywords.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        for variant in &self.variants {
            write!(f, "-{variant}")?;
        }
        if !self.keywords.is_empty() {
            f.write_str("-u")?;
            for (key, value) in &self.keywords {
                write!(f, "-{key}")?;
                if value != "true" {
                    write!(f, "-{value}")?;
                }
            }
        }
        Ok(())
    }
}
