use std::cmp::min;
use super::{AnnotatedString, AnnotatedStringPart};

/// 按标注边界把字符串切成片段的迭代器。
///
/// 多个标注覆盖同一位置时，后添加的优先。
pub struct AnnotatedStringIterator<'a> {
    pub annotated_string: &'a AnnotatedString,
    // 当前迭代的字节索引
    pub current_idx: usize,
}

impl<'a> Iterator for AnnotatedStringIterator<'a> {
    type Item = AnnotatedStringPart<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let string = &self.annotated_string.string;
        if self.current_idx >= string.len() {
            return None;
        }
        let start_idx = self.current_idx;

        // 下一个边界：任何标注在当前位置之后的开始或结束
        let end_idx = self
            .annotated_string
            .annotations
            .iter()
            .flat_map(|annotation| [annotation.start, annotation.end])
            .filter(|&idx| idx > start_idx)
            .fold(string.len(), min);

        // 包含当前位置的标注中最后添加的那个
        let annotation_type = self
            .annotated_string
            .annotations
            .iter()
            .filter(|annotation| annotation.start <= start_idx && annotation.end > start_idx)
            .last()
            .map(|annotation| annotation.annotation_type);

        self.current_idx = end_idx;
        Some(AnnotatedStringPart {
            string: &string[start_idx..end_idx],
            annotation_type,
        })
    }
}
