use std::fmt::{self, Display};

use crate::prelude::*;

/// 违规类型
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ViolationKind {
    // 亲文字跨越了折返
    ParentSplit,
    // 注音超出右边界
    RubyOverflow,
    // 最终折返行过短
    ShortFinalLine,
    // 折返行中半角字符数为奇数
    OddHalfWidth,
    // 行头禁则
    LineStartProhibited,
    // 行末禁则
    LineEndProhibited,
}

impl Display for ViolationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::ParentSplit => "ParentSplit",
            Self::RubyOverflow => "RubyOverflow",
            Self::ShortFinalLine => "ShortFinalLine",
            Self::OddHalfWidth => "OddHalfWidth",
            Self::LineStartProhibited => "LineStartProhibited",
            Self::LineEndProhibited => "LineEndProhibited",
        };
        write!(formatter, "{name}")
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    // 源文件行号
    pub line: LineNo,
    // 涉及的折返行
    pub wrap: WrapIdx,
    pub description: String,
    // 预览时需要标记的字符
    pub marks: Vec<CharIdx>,
}
