use std::fmt::{self, Display};

use crate::prelude::*;

pub use annotationtype::AnnotationType;
use annotatedstringiterator::AnnotatedStringIterator;

mod annotationtype;
mod annotatedstringiterator;

/// 一段字节区间上的标注
#[derive(Copy, Clone, Debug)]
struct Annotation {
    annotation_type: AnnotationType,
    start: ByteIdx,
    // 不含
    end: ByteIdx,
}

/// 迭代得到的片段，直接引用原字符串
#[derive(Debug, PartialEq, Eq)]
pub struct AnnotatedStringPart<'a> {
    pub string: &'a str,
    pub annotation_type: Option<AnnotationType>,
}

/// 带标注的字符串，预览时一行一个
#[derive(Default, Debug)]
pub struct AnnotatedString {
    string: String,
    annotations: Vec<Annotation>,
}

impl AnnotatedString {
    pub fn from(string: &str) -> Self {
        Self {
            string: String::from(string),
            annotations: Vec::new(),
        }
    }

    /// 新增标注。空区间被忽略，越界部分截断到字符串末尾。
    pub fn add_annotation(
        &mut self,
        annotation_type: AnnotationType,
        start: ByteIdx,
        end: ByteIdx,
    ) {
        debug_assert!(start <= end);
        let end = end.min(self.string.len());
        if start >= end {
            return;
        }
        self.annotations.push(Annotation {
            annotation_type,
            start,
            end,
        });
    }

    pub fn push_str(&mut self, string: &str) {
        self.string.push_str(string);
    }

    pub fn len(&self) -> ByteIdx {
        self.string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }
}

impl Display for AnnotatedString {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.string)
    }
}

impl<'a> IntoIterator for &'a AnnotatedString {
    type Item = AnnotatedStringPart<'a>;
    type IntoIter = AnnotatedStringIterator<'a>;
    fn into_iter(self) -> Self::IntoIter {
        AnnotatedStringIterator {
            annotated_string: self,
            current_idx: 0,
        }
    }
}
