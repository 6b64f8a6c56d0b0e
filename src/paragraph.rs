use tracing::debug;

use crate::annotator::{Annotation, RubySpan};
use crate::error::CheckError;
use crate::prelude::*;

/// 标注器和模拟器之间的交接类型。
///
/// 构造时校验注音区间：越界的区间被丢弃，重叠的区间使整个段落无效。
/// 因此之后的规则检查可以假定每个区间都指向显示序列中的有效位置。
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Paragraph {
    line: LineNo,
    text: Vec<char>,
    spans: Vec<RubySpan>,
}

impl Paragraph {
    pub fn new(line: LineNo, annotation: Annotation) -> Result<Self, CheckError> {
        let Annotation { text, spans } = annotation;
        let len = text.len();

        let valid: Vec<RubySpan> = spans
            .into_iter()
            .filter(|span| {
                let in_range = span.start <= span.end && span.end < len;
                if !in_range {
                    debug!(line, %span, len, "skipping ruby span outside the display text");
                }
                in_range
            })
            .collect();

        let mut ordered = valid.clone();
        ordered.sort_by_key(|span| span.start);
        if let Some(pair) = ordered.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
            return Err(CheckError::OverlappingRubySpans {
                line,
                first: pair[0],
                second: pair[1],
            });
        }

        Ok(Self {
            line,
            text,
            spans: valid,
        })
    }

    pub fn line(&self) -> LineNo {
        self.line
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn spans(&self) -> &[RubySpan] {
        &self.spans
    }

    pub fn is_blank(&self) -> bool {
        self.text.iter().all(|ch| ch.is_whitespace())
    }

    /// 亲文字
    pub fn parent_text(&self, span: &RubySpan) -> String {
        self.text
            .get(span.start..=span.end)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::annotate;
    use pretty_assertions::assert_eq;

    fn annotation(text: &str, spans: Vec<RubySpan>) -> Annotation {
        Annotation {
            text: text.chars().collect(),
            spans,
        }
    }

    fn span(start: CharIdx, end: CharIdx) -> RubySpan {
        RubySpan {
            start,
            end,
            ruby_width: 2,
        }
    }

    #[test]
    fn test_annotator_output_is_accepted() {
        let paragraph = Paragraph::new(3, annotate("｜東京《とうきょう》へ行く")).unwrap();
        assert_eq!(paragraph.line(), 3);
        assert_eq!(paragraph.spans().len(), 1);
        assert_eq!(paragraph.parent_text(&paragraph.spans()[0]), "東京");
    }

    #[test]
    fn test_out_of_range_spans_are_dropped() {
        let paragraph =
            Paragraph::new(1, annotation("漢字", vec![span(0, 1), span(1, 5), span(2, 2)]))
                .unwrap();
        assert_eq!(paragraph.spans(), &[span(0, 1)]);
    }

    #[test]
    fn test_inverted_span_is_dropped() {
        let paragraph = Paragraph::new(1, annotation("漢字", vec![span(1, 0)])).unwrap();
        assert!(paragraph.spans().is_empty());
    }

    #[test]
    fn test_overlapping_spans_are_rejected() {
        let err = Paragraph::new(7, annotation("漢字仮名", vec![span(2, 3), span(0, 2)]))
            .unwrap_err();
        match err {
            CheckError::OverlappingRubySpans {
                line,
                first,
                second,
            } => {
                assert_eq!(line, 7);
                assert_eq!(first, span(0, 2));
                assert_eq!(second, span(2, 3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_adjacent_spans_are_fine() {
        let paragraph =
            Paragraph::new(1, annotation("漢字仮名", vec![span(0, 1), span(2, 3)])).unwrap();
        assert_eq!(paragraph.spans().len(), 2);
    }
}
