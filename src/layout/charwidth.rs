use std::ops::RangeInclusive;

use unicode_width::UnicodeWidthChar;

use crate::config::LayoutConfig;
use crate::prelude::*;

/// 结合用附加符号
const COMBINING_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';
/// 异体字选择符
const VARIATION_SELECTORS: RangeInclusive<char> = '\u{FE00}'..='\u{FE0F}';
/// 浊点、半浊点。不在段首时视为与前一个字符结合。
const SOUND_MARKS: [char; 2] = ['゛', '゜'];

/// 计算显示序列中第 `idx` 个字符的显示宽度（0、1 或 2）。
pub fn char_width(ch: char, idx: CharIdx, config: &LayoutConfig) -> usize {
    if COMBINING_MARKS.contains(&ch) || VARIATION_SELECTORS.contains(&ch) {
        return 0;
    }
    if config.is_forced_wide(ch) {
        return 2;
    }
    if idx > 0 && SOUND_MARKS.contains(&ch) {
        return 0;
    }
    east_asian_width(ch)
}

/// Fullwidth、Wide、Ambiguous 为 2，其他为 1。
///
/// `width_cjk` 把 Ambiguous 当作 2 计算，正好对应这里的规则；
/// 它返回 0（其他结合字符）或 `None`（控制字符）时按 1 处理。
fn east_asian_width(ch: char) -> usize {
    match ch.width_cjk() {
        Some(2) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('a', 1)]
    #[case(' ', 1)]
    #[case('ｱ', 1)]
    #[case('あ', 2)]
    #[case('漢', 2)]
    #[case('　', 2)]
    #[case('Ａ', 2)]
    #[case('…', 2)]
    #[case('“', 2)]
    #[case('\u{0301}', 0)]
    #[case('\u{FE0F}', 0)]
    #[case('★', 2)]
    #[case('♥', 2)]
    #[case('\t', 1)]
    fn test_width_classes(#[case] ch: char, #[case] expected: usize) {
        assert_eq!(char_width(ch, 3, &LayoutConfig::default()), expected);
    }

    #[test]
    fn test_sound_mark_combines_unless_first() {
        let config = LayoutConfig::default();
        assert_eq!(char_width('゛', 1, &config), 0);
        assert_eq!(char_width('゜', 5, &config), 0);
        assert_eq!(char_width('゛', 0, &config), 2);
    }

    #[test]
    fn test_forced_wide_follows_config() {
        let config = LayoutConfig {
            forced_wide: String::new(),
            ..LayoutConfig::default()
        };
        // ☆ 是 Ambiguous，即使不强制也是 2
        assert_eq!(char_width('☆', 1, &config), 2);
        let config = LayoutConfig {
            forced_wide: "x".to_string(),
            ..LayoutConfig::default()
        };
        assert_eq!(char_width('x', 1, &config), 2);
    }
}
