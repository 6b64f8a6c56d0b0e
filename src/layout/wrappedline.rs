use std::ops::Range;

use super::DisplayChar;
use crate::prelude::*;

/// 同一折返行上的连续字符，按列顺序排列。
#[derive(Copy, Clone, Debug)]
pub struct WrappedLine<'a> {
    pub index: WrapIdx,
    // 第一个字符在显示序列中的索引
    pub start: CharIdx,
    pub chars: &'a [DisplayChar],
}

impl<'a> WrappedLine<'a> {
    pub fn width(&self) -> ColIdx {
        self.chars.iter().map(|display_char| display_char.width).sum()
    }

    pub fn half_width_count(&self) -> usize {
        self.chars
            .iter()
            .filter(|display_char| display_char.is_half_width())
            .count()
    }

    pub fn first(&self) -> Option<&'a DisplayChar> {
        self.chars.first()
    }

    pub fn last(&self) -> Option<&'a DisplayChar> {
        self.chars.last()
    }

    /// 该行在显示序列中的索引范围
    pub fn char_range(&self) -> Range<CharIdx> {
        self.start..self.start.saturating_add(self.chars.len())
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|display_char| display_char.ch).collect()
    }
}
