use serde::Deserialize;

use super::{BidiClass, GraphemeClusterBreak, LineBreakClass, SentenceBreak, WordBreak};
use crate::DataError;

/// TOML document describing a property snapshot as overrides on top of the
/// compiled data.
///
/// ```toml
/// version = "15.0.0-private-use"
///
/// [[bidi_class]]
/// start = 0xE000
/// end = 0xE0FF
/// class = "R"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OverrideDocument {
    pub version: String,
    #[serde(default)]
    pub bidi_class: Vec<RangeEntry>,
    #[serde(default)]
    pub line_break: Vec<RangeEntry>,
    #[serde(default)]
    pub grapheme_cluster_break: Vec<RangeEntry>,
    #[serde(default)]
    pub word_break: Vec<RangeEntry>,
    #[serde(default)]
    pub sentence_break: Vec<RangeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RangeEntry {
    pub start: u32,
    /// Inclusive; a single code point when omitted.
    pub end: Option<u32>,
    pub class: String,
}

pub(crate) trait PropertyValue: Copy {
    const PROPERTY_NAME: &'static str;
    fn parse(name: &str) -> Option<Self>;
}

macro_rules! impl_property_value {
    ($($ty:ty),+) => {
        $(impl PropertyValue for $ty {
            const PROPERTY_NAME: &'static str = <$ty>::PROPERTY;
            fn parse(name: &str) -> Option<Self> {
                <$ty>::from_name(name)
            }
        })+
    };
}

impl_property_value!(BidiClass, LineBreakClass, GraphemeClusterBreak, WordBreak, SentenceBreak);

/// Sorted, disjoint inclusive ranges mapped to a property value.
#[derive(Debug, Clone)]
pub(crate) struct RangeMap<T> {
    ranges: Vec<(u32, u32, T)>,
}

impl<T> Default for RangeMap<T> {
    fn default() -> Self {
        Self { ranges: Vec::new() }
    }
}

impl<T: PropertyValue> RangeMap<T> {
    pub(crate) fn build(entries: Vec<RangeEntry>) -> Result<Self, DataError> {
        let mut ranges = Vec::with_capacity(entries.len());
        for entry in entries {
            let end = entry.end.unwrap_or(entry.start);
            if entry.start > end || end > char::MAX as u32 {
                return Err(DataError::InvalidRange {
                    property: T::PROPERTY_NAME,
                    start: entry.start,
                    end,
                });
            }
            let value = T::parse(&entry.class).ok_or_else(|| DataError::UnknownClass {
                property: T::PROPERTY_NAME,
                name: entry.class.clone(),
            })?;
            ranges.push((entry.start, end, value));
        }
        ranges.sort_by_key(|&(start, _, _)| start);
        if let Some(pair) = ranges.windows(2).find(|pair| pair[0].1 >= pair[1].0) {
            return Err(DataError::OverlappingRanges {
                property: T::PROPERTY_NAME,
                start: pair[1].0,
            });
        }
        Ok(Self { ranges })
    }
}

impl<T: Copy> RangeMap<T> {
    pub(crate) fn get(&self, c: char) -> Option<T> {
        if self.ranges.is_empty() {
            return None;
        }
        let cp = c as u32;
        let idx = self.ranges.partition_point(|&(start, _, _)| start <= cp);
        let &(_, end, value) = self.ranges.get(idx.checked_sub(1)?)?;
        (cp <= end).then_some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.ranges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: u32, end: Option<u32>, class: &str) -> RangeEntry {
        RangeEntry {
            start,
            end,
            class: class.to_string(),
        }
    }

    #[test]
    fn lookup_hits_inclusive_bounds() {
        let map: RangeMap<BidiClass> =
            RangeMap::build(vec![entry(0x41, Some(0x43), "R"), entry(0x30, None, "AL")]).unwrap();
        assert_eq!(map.get('A'), Some(BidiClass::R));
        assert_eq!(map.get('C'), Some(BidiClass::R));
        assert_eq!(map.get('D'), None);
        assert_eq!(map.get('0'), Some(BidiClass::AL));
        assert_eq!(map.get('1'), None);
        assert_eq!(map.get('\0'), None);
    }

    #[test]
    fn rejects_unknown_class_names() {
        let err = RangeMap::<WordBreak>::build(vec![entry(0x41, None, "Letterish")]).unwrap_err();
        assert!(matches!(err, DataError::UnknownClass { property: "word_break", .. }));
    }

    #[test]
    fn rejects_overlaps_and_inverted_ranges() {
        let err = RangeMap::<BidiClass>::build(vec![
            entry(0x41, Some(0x50), "R"),
            entry(0x50, Some(0x60), "L"),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::OverlappingRanges { start: 0x50, .. }));

        let err = RangeMap::<BidiClass>::build(vec![entry(0x50, Some(0x41), "R")]).unwrap_err();
        assert!(matches!(err, DataError::InvalidRange { .. }));

        let err = RangeMap::<BidiClass>::build(vec![entry(0x11_0000, None, "R")]).unwrap_err();
        assert!(matches!(err, DataError::InvalidRange { .. }));
    }
}
