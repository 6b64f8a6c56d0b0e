//! 固定宽度的折返模拟。

use crate::config::LayoutConfig;
use crate::prelude::*;

pub use charwidth::char_width;
pub use displaychar::DisplayChar;
pub use wrappedline::WrappedLine;

mod charwidth;
mod displaychar;
mod wrappedline;

/// 一个段落的折返结果，每个显示字符都带有所在行和列。
#[derive(Default, Debug, Clone)]
pub struct Layout {
    chars: Vec<DisplayChar>,
    max_width: ColIdx,
}

impl Layout {
    /// 贪心折返：加上当前字符会超过 `max_width` 时换到下一行。
    ///
    /// 不拆分字符，不向前看，也不回溯。
    pub fn simulate(text: &[char], config: &LayoutConfig) -> Self {
        let max_width = config.max_width;
        let mut chars = Vec::with_capacity(text.len());
        let mut col: ColIdx = 0;
        let mut line: WrapIdx = 0;

        for (idx, &ch) in text.iter().enumerate() {
            let width = char_width(ch, idx, config);
            // col > 0：配置保证全角字符在空行上放得下，这里不会产生空行
            if col > 0 && col.saturating_add(width) > max_width {
                col = 0;
                line = line.saturating_add(1);
            }
            chars.push(DisplayChar {
                ch,
                width,
                line,
                col,
                flagged: false,
            });
            col = col.saturating_add(width);
        }

        Self { chars, max_width }
    }

    pub fn chars(&self) -> &[DisplayChar] {
        &self.chars
    }

    pub fn get(&self, idx: CharIdx) -> Option<&DisplayChar> {
        self.chars.get(idx)
    }

    /// 折返时使用的行宽，规则检查以此为准
    pub fn max_width(&self) -> ColIdx {
        self.max_width
    }

    /// 折返行数，空段落为 0
    pub fn line_count(&self) -> usize {
        self.chars
            .last()
            .map_or(0, |display_char| display_char.line.saturating_add(1))
    }

    /// 按折返行分组
    pub fn lines(&self) -> Vec<WrappedLine<'_>> {
        let mut lines = Vec::with_capacity(self.line_count());
        let mut start: CharIdx = 0;
        for group in self
            .chars
            .chunk_by(|left, right| left.line == right.line)
        {
            lines.push(WrappedLine {
                index: group[0].line,
                start,
                chars: group,
            });
            start = start.saturating_add(group.len());
        }
        lines
    }

    /// 标记违规字符，超出范围的索引忽略
    pub fn flag(&mut self, idx: CharIdx) {
        if let Some(display_char) = self.chars.get_mut(idx) {
            display_char.flagged = true;
        }
    }

    /// 第一段连续的违规字符
    pub fn first_flagged_run(&self) -> Option<std::ops::Range<CharIdx>> {
        let start = self.chars.iter().position(|display_char| display_char.flagged)?;
        let len = self.chars[start..]
            .iter()
            .take_while(|display_char| display_char.flagged)
            .count();
        Some(start..start.saturating_add(len))
    }
}
