//! 对折返结果执行四类排版规则。

use crate::config::LayoutConfig;
use crate::layout::{Layout, WrappedLine};
use crate::paragraph::Paragraph;

pub use violation::{Violation, ViolationKind};

mod violation;

/// 半角奇数违规时，描述中引用的行首字符数
const SAMPLE_LEN: usize = 10;

pub struct RuleChecker<'a> {
    config: &'a LayoutConfig,
}

impl<'a> RuleChecker<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// 按固定顺序返回段落中的所有违规：
    /// 注音完整性 → 最终行长度 → 各折返行的半角奇数和禁则（按行顺序）。
    pub fn evaluate(&self, paragraph: &Paragraph, layout: &Layout) -> Vec<Violation> {
        let mut violations = self.check_ruby_spans(paragraph, layout);
        let lines = layout.lines();
        violations.extend(self.check_short_final_line(paragraph, &lines));
        for line in &lines {
            violations.extend(self.check_line(paragraph, line, lines.len()));
        }
        violations
    }

    /// 报告模式只关心每个段落的第一个违规
    pub fn first_violation(&self, paragraph: &Paragraph, layout: &Layout) -> Option<Violation> {
        self.evaluate(paragraph, layout).into_iter().next()
    }

    /// 标记所有违规字符，供预览模式使用
    pub fn flag_violations(layout: &mut Layout, violations: &[Violation]) {
        violations
            .iter()
            .flat_map(|violation| violation.marks.iter())
            .for_each(|&idx| layout.flag(idx));
    }

    fn check_ruby_spans(&self, paragraph: &Paragraph, layout: &Layout) -> Vec<Violation> {
        let mut violations = Vec::new();
        for span in paragraph.spans() {
            // 交接类型已经校验过，取不到时跳过该区间
            let (Some(start), Some(end)) = (layout.get(span.start), layout.get(span.end)) else {
                continue;
            };
            let marks = (span.start..=span.end).collect();
            let parent = paragraph.parent_text(span);

            if start.line != end.line {
                violations.push(Violation {
                    kind: ViolationKind::ParentSplit,
                    line: paragraph.line(),
                    wrap: start.line,
                    description: format!(
                        "ruby parent 「{parent}」 is split across wrapped lines {} and {}",
                        start.line.saturating_add(1),
                        end.line.saturating_add(1)
                    ),
                    marks,
                });
            } else if start.col.saturating_add(span.ruby_width) > layout.max_width() {
                violations.push(Violation {
                    kind: ViolationKind::RubyOverflow,
                    line: paragraph.line(),
                    wrap: start.line,
                    description: format!(
                        "ruby on 「{parent}」 ({} chars) runs past the right margin on wrapped line {}",
                        span.ruby_width,
                        start.line.saturating_add(1)
                    ),
                    marks,
                });
            }
        }
        violations
    }

    fn check_short_final_line(
        &self,
        paragraph: &Paragraph,
        lines: &[WrappedLine<'_>],
    ) -> Option<Violation> {
        if lines.len() < 2 {
            return None;
        }
        let last = lines.last()?;
        let width = last.width();
        if width > self.config.min_last_line_width {
            return None;
        }
        Some(Violation {
            kind: ViolationKind::ShortFinalLine,
            line: paragraph.line(),
            wrap: last.index,
            description: format!(
                "final wrapped line {} is only {width} columns wide (needs more than {})",
                last.index.saturating_add(1),
                self.config.min_last_line_width
            ),
            marks: last.char_range().collect(),
        })
    }

    fn check_line(
        &self,
        paragraph: &Paragraph,
        line: &WrappedLine<'_>,
        line_count: usize,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        let number = line.index.saturating_add(1);

        let half_width_count = line.half_width_count();
        if half_width_count % 2 != 0 {
            let sample: String = line.chars.iter().take(SAMPLE_LEN).map(|c| c.ch).collect();
            violations.push(Violation {
                kind: ViolationKind::OddHalfWidth,
                line: paragraph.line(),
                wrap: line.index,
                description: format!(
                    "wrapped line {number} has {half_width_count} half-width characters near: {sample}..."
                ),
                marks: line
                    .char_range()
                    .zip(line.chars)
                    .filter(|(_, display_char)| display_char.is_half_width())
                    .map(|(idx, _)| idx)
                    .collect(),
            });
        }

        if line.index > 0 {
            if let Some(first) = line.first() {
                if self.config.is_line_start_prohibited(first.ch) {
                    violations.push(Violation {
                        kind: ViolationKind::LineStartProhibited,
                        line: paragraph.line(),
                        wrap: line.index,
                        description: format!("「{}」 starts wrapped line {number}", first.ch),
                        marks: vec![line.start],
                    });
                }
            }
        }

        if line.index.saturating_add(1) < line_count {
            if let Some(last) = line.last() {
                if self.config.is_line_end_prohibited(last.ch) {
                    violations.push(Violation {
                        kind: ViolationKind::LineEndProhibited,
                        line: paragraph.line(),
                        wrap: line.index,
                        description: format!("「{}」 ends wrapped line {number}", last.ch),
                        marks: vec![line.char_range().end.saturating_sub(1)],
                    });
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::annotate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(raw: &str, config: &LayoutConfig) -> Vec<Violation> {
        let paragraph = Paragraph::new(1, annotate(raw)).unwrap();
        let layout = Layout::simulate(paragraph.text(), config);
        RuleChecker::new(config).evaluate(&paragraph, &layout)
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|violation| violation.kind).collect()
    }

    #[test]
    fn test_short_ruby_line_is_clean() {
        assert!(run("｜桜《さくら》が咲く", &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_short_final_line() {
        let violations = run(&"あ".repeat(41), &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::ShortFinalLine]);
        assert_eq!(violations[0].wrap, 1);
        assert_eq!(violations[0].marks, vec![40]);
    }

    #[test]
    fn test_final_line_just_long_enough() {
        // 最终行宽度 8 > 6
        assert!(run(&"あ".repeat(44), &LayoutConfig::default()).is_empty());
        // 宽度 6 不超过 6
        let violations = run(&"あ".repeat(43), &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::ShortFinalLine]);
    }

    #[test]
    fn test_line_start_prohibited() {
        let text = format!("{}、{}", "あ".repeat(40), "い".repeat(10));
        let violations = run(&text, &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::LineStartProhibited]);
        assert_eq!(violations[0].marks, vec![40]);
        assert_eq!(violations[0].description, "「、」 starts wrapped line 2");
    }

    #[test]
    fn test_line_end_prohibited() {
        let text = format!("{}「{}」", "あ".repeat(39), "い".repeat(10));
        let violations = run(&text, &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::LineEndProhibited]);
        assert_eq!(violations[0].wrap, 0);
        assert_eq!(violations[0].marks, vec![39]);
    }

    #[test]
    fn test_prohibited_chars_inside_a_line_are_fine() {
        let text = format!("「{}」、{}", "あ".repeat(10), "い".repeat(20));
        assert!(run(&text, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_parent_split() {
        // 亲文字「東京」从第 40 字开始，跨越折返
        let text = format!("{}｜東京《とうきょう》{}", "あ".repeat(39), "い".repeat(10));
        let violations = run(&text, &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::ParentSplit]);
        assert_eq!(violations[0].marks, vec![39, 40]);
    }

    #[test]
    fn test_ruby_overflow() {
        // 亲文字在第 78 列，注音 4 字
        let text = format!("{}｜京《きょうと》{}", "あ".repeat(39), "い".repeat(10));
        let violations = run(&text, &LayoutConfig::default());
        assert_eq!(kinds(&violations), vec![ViolationKind::RubyOverflow]);
    }

    #[test]
    fn test_ruby_reaching_the_margin_exactly_is_fine() {
        let text = format!("{}｜京《きょ》{}", "あ".repeat(39), "い".repeat(10));
        assert!(run(&text, &LayoutConfig::default()).is_empty());
    }

    #[rstest]
    #[case("abc", true)]
    #[case("abcd", false)]
    #[case("ab あ c", true)]
    #[case("あいう", false)]
    fn test_half_width_parity(#[case] text: &str, #[case] violates: bool) {
        let violations = run(text, &LayoutConfig::default());
        assert_eq!(
            kinds(&violations) == vec![ViolationKind::OddHalfWidth],
            violates
        );
    }

    #[test]
    fn test_odd_half_width_marks_only_half_width_chars() {
        let violations = run("aあbいc", &LayoutConfig::default());
        assert_eq!(violations[0].marks, vec![0, 2, 4]);
        assert_eq!(
            violations[0].description,
            "wrapped line 1 has 3 half-width characters near: aあbいc..."
        );
    }

    #[test]
    fn test_evaluation_order() {
        // 同时违反：亲文字割裂、最终行过短
        let text = format!("{}｜東京《とうきょう》」", "あ".repeat(39));
        let config = LayoutConfig::default();
        let violations = run(&text, &config);
        assert_eq!(
            kinds(&violations),
            vec![
                ViolationKind::ParentSplit,
                ViolationKind::ShortFinalLine,
            ]
        );

        let text = format!("{}、ab", "あ".repeat(40));
        let violations = run(&text, &config);
        assert_eq!(
            kinds(&violations),
            vec![
                ViolationKind::ShortFinalLine,
                ViolationKind::LineStartProhibited,
            ]
        );

        let paragraph = Paragraph::new(1, annotate(&text)).unwrap();
        let layout = Layout::simulate(paragraph.text(), &config);
        let first = RuleChecker::new(&config).first_violation(&paragraph, &layout);
        assert_eq!(first.map(|v| v.kind), Some(ViolationKind::ShortFinalLine));
    }

    #[test]
    fn test_flag_violations() {
        let config = LayoutConfig::default();
        let paragraph = Paragraph::new(1, annotate(&"あ".repeat(41))).unwrap();
        let mut layout = Layout::simulate(paragraph.text(), &config);
        let violations = RuleChecker::new(&config).evaluate(&paragraph, &layout);
        RuleChecker::flag_violations(&mut layout, &violations);
        assert_eq!(layout.first_flagged_run(), Some(40..41));
    }
}
