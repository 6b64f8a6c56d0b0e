use crossterm::style::Color;
use crate::annotatedstring::AnnotationType;

/// 终端可以使用的属性
pub struct Attribute {
    // 前景字体颜色
    pub foreground: Option<Color>,
    // 反显
    pub reverse: bool,
    pub underline: bool,
}

impl From<AnnotationType> for Attribute {
    fn from(annotation_type: AnnotationType) -> Self {
        match annotation_type {
            AnnotationType::Ruby => Self {
                foreground: Some(Color::Cyan),
                reverse: false,
                underline: true,
            },
            AnnotationType::Violation => Self {
                foreground: None,
                reverse: true,
                underline: false,
            },
        }
    }
}
