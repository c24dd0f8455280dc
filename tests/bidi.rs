use anyhow::{Context, Result};
use rune_intl::rune_text::bidi::{
    base_left_to_right_level, base_right_to_left_level, is_left_to_right, is_right_to_left,
    reorder_visual, Level, ParagraphDirection, MAX_DEPTH,
};
use rune_intl::Intl;

#[test]
fn mixed_paragraph_reverses_only_hebrew() -> Result<()> {
    let intl = Intl::new();
    let text = "AB אב";
    let info = intl.resolve_bidi(text);

    let para = info.paragraphs().first().context("one paragraph")?;
    assert_eq!(para.level(), Level::LTR);
    assert_eq!(para.direction(), ParagraphDirection::Mixed);
    let levels: Vec<u8> = para.levels().iter().map(|&l| l.into()).collect();
    assert_eq!(levels, [0, 0, 0, 1, 1]);
    assert_eq!(para.visual_map(0..para.levels().len()), [0, 1, 2, 4, 3]);
    assert_eq!(info.reorder_line_str(text, 0, para.range()), "AB בא");
    Ok(())
}

#[test]
fn empty_text_has_no_paragraphs() -> Result<()> {
    let intl = Intl::new();
    let info = intl.resolve_bidi("");
    assert!(info.paragraphs().is_empty());
    assert!(info.levels().is_empty());
    assert!(!info.has_rtl());
    Ok(())
}

#[test]
fn reorder_visual_example() -> Result<()> {
    assert_eq!(reorder_visual(&[0u8, 0, 1, 1, 0]), [0, 1, 3, 2, 4]);
    Ok(())
}

#[test]
fn reordering_is_a_bijection() -> Result<()> {
    let cases: [&[u8]; 6] = [
        &[],
        &[1],
        &[0, 1, 2, 3, 2, 1, 0],
        &[2, 2, 4, 3, 1, 6, 6, 0],
        &[125, 124, 1, 126, 200],
        &[3, 3, 3, 3],
    ];
    for levels in cases {
        let mut map = reorder_visual(levels);
        assert_eq!(map.len(), levels.len());
        map.sort_unstable();
        assert!(map.iter().copied().eq(0..levels.len()), "{levels:?}");
    }

    let intl = Intl::new();
    let text = "one (two שלוש) 4,5 ארבע five\u{2067}شش\u{2069}!";
    let info = intl.resolve_bidi(text);
    for para in info.paragraphs() {
        let count = para.levels().len();
        let mut map = para.visual_map(0..count);
        map.sort_unstable();
        assert!(map.iter().copied().eq(0..count));
    }
    Ok(())
}

#[test]
fn level_queries_agree() -> Result<()> {
    for level in 0..=MAX_DEPTH {
        assert_eq!(is_left_to_right(level), !is_right_to_left(level));
    }
    for level in (MAX_DEPTH + 1)..=u8::MAX {
        assert!(is_left_to_right(level));
        assert!(!is_right_to_left(level));
    }
    assert!(is_left_to_right(base_left_to_right_level()));
    assert!(is_right_to_left(base_right_to_left_level()));
    Ok(())
}

#[test]
fn explicit_base_level_overrides_detection() -> Result<()> {
    let intl = Intl::new();
    let info = intl
        .bidi()
        .resolve_str("abc", Some(Level::new(base_right_to_left_level())));
    let para = info.paragraphs().first().context("one paragraph")?;
    assert!(para.level().is_rtl());
    let levels: Vec<u8> = para.levels().iter().map(|&l| l.into()).collect();
    assert_eq!(levels, [2, 2, 2]);
    Ok(())
}

/// Cases in the BidiCharacterTest.txt field layout: code points; paragraph
/// direction (0 LTR, 1 RTL, 2 auto); resolved paragraph level; levels after
/// L1 (`x` for characters removed by X9); visual order of the kept characters.
const CHARACTER_CASES: &[&str] = &[
    "0041 0042 0020 05D0 05D1;2;0;0 0 0 1 1;0 1 2 4 3",
    "0041 0042 0020 05D0 05D1;1;1;2 2 1 1 1;4 3 2 0 1",
    "05D0 0020 0031 0032;2;1;1 1 2 2;2 3 1 0",
    "0061 0020 05D0 0020 0031;0;0;0 0 1 1 2;0 1 4 3 2",
    "202B 0061 202C 0062;0;0;x 2 x 0;1 3",
    "202D 05D0 05D1 202C;0;0;x 2 2 x;1 2",
    "0061 2067 05D0 2069 0062;0;0;0 0 1 0 0;0 1 2 3 4",
    "05D0 0028 0061 0029;1;1;1 1 2 1;3 2 1 0",
    "0061 0028 0062 0029 05D0;1;1;2 2 2 2 1;4 0 1 2 3",
    "0627 0031;2;1;1 2;1 0",
    "0061 0020;1;1;2 1;1 0",
    "0031 002B 0032;1;1;2 2 2;0 1 2",
    "0024 0031 0020 05D0;0;0;0 0 0 1;0 1 2 3",
];

fn check_character_case(intl: &Intl, case: &str) -> Result<()> {
    let fields: Vec<&str> = case.split(';').collect();
    anyhow::ensure!(fields.len() == 5, "malformed case {case}");

    let text = fields[0]
        .split_whitespace()
        .map(|hex| {
            let scalar = u32::from_str_radix(hex, 16)?;
            char::from_u32(scalar).context("not a scalar value")
        })
        .collect::<Result<String>>()?;
    let base = match fields[1] {
        "0" => Some(Level::LTR),
        "1" => Some(Level::RTL),
        _ => None,
    };
    let paragraph_level: u8 = fields[2].parse()?;
    let expected_levels = fields[3]
        .split_whitespace()
        .map(|level| match level {
            "x" => Ok(None),
            level => level.parse::<u8>().map(Some),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let expected_order = fields[4]
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()?;

    let info = intl.bidi().resolve_str(&text, base);
    let para = info.paragraphs().first().context("one paragraph")?;
    assert_eq!(u8::from(para.level()), paragraph_level, "{case}");

    let count = para.levels().len();
    assert_eq!(count, expected_levels.len(), "{case}");
    for (index, (actual, expected)) in para
        .reordered_levels(0..count)
        .into_iter()
        .zip(&expected_levels)
        .enumerate()
    {
        if let Some(expected) = expected {
            assert_eq!(u8::from(actual), *expected, "{case}: level of {index}");
        }
    }

    let order: Vec<usize> = para
        .visual_map(0..count)
        .into_iter()
        .filter(|&index| expected_levels[index].is_some())
        .collect();
    assert_eq!(order, expected_order, "{case}");
    Ok(())
}

#[test]
fn character_test_cases() -> Result<()> {
    let intl = Intl::new();
    for case in CHARACTER_CASES {
        check_character_case(&intl, case)?;
    }
    Ok(())
}
