use std::fmt::{self, Display};

use crate::prelude::*;

/// 带注音的亲文字在显示序列中的位置。
///
/// `start` 和 `end` 都是闭区间端点，`ruby_width` 是注音的字符数。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RubySpan {
    pub start: CharIdx,
    pub end: CharIdx,
    pub ruby_width: usize,
}

impl RubySpan {
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl Display for RubySpan {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "[{}..={}] (ruby {})",
            self.start, self.end, self.ruby_width
        )
    }
}
