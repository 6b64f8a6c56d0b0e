use crate::prelude::*;

/// 折返模拟后的一个显示字符
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DisplayChar {
    pub ch: char,
    pub width: usize,
    // 所在折返行
    pub line: WrapIdx,
    // 行内列偏移
    pub col: ColIdx,
    // 是否被规则判定为违规（预览时用来反显）
    pub flagged: bool,
}

impl DisplayChar {
    pub fn is_half_width(&self) -> bool {
        self.width == 1
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0
    }
}
