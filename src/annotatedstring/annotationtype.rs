/// 预览中字符片段的标注类型
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AnnotationType {
    // 带注音的亲文字
    Ruby,
    // 违规字符，反显
    Violation,
}
