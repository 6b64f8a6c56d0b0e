use std::{fs::read_to_string, io::ErrorKind, path::Path};

use tracing::{debug, warn};

use crate::annotator::annotate;
use crate::config::LayoutConfig;
use crate::error::CheckError;
use crate::layout::Layout;
use crate::paragraph::Paragraph;
use crate::prelude::*;
use crate::rules::{RuleChecker, Violation};

/// 一个段落的检查结果
#[derive(Debug, Clone)]
pub struct ParagraphCheck {
    pub paragraph: Paragraph,
    pub layout: Layout,
    // 按规则顺序排列的所有违规
    pub violations: Vec<Violation>,
}

impl ParagraphCheck {
    /// 标注 → 交接校验 → 折返模拟 → 规则检查。
    ///
    /// 空白段落不模拟也不检查，得到空的折返结果。
    pub fn run(line: LineNo, raw: &str, config: &LayoutConfig) -> Result<Self, CheckError> {
        let paragraph = Paragraph::new(line, annotate(raw))?;
        if paragraph.is_blank() {
            return Ok(Self {
                paragraph,
                layout: Layout::default(),
                violations: Vec::new(),
            });
        }

        let mut layout = Layout::simulate(paragraph.text(), config);
        let violations = RuleChecker::new(config).evaluate(&paragraph, &layout);
        RuleChecker::flag_violations(&mut layout, &violations);
        debug!(
            line,
            wrapped_lines = layout.line_count(),
            violations = violations.len(),
            "checked paragraph"
        );

        Ok(Self {
            paragraph,
            layout,
            violations,
        })
    }

    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// 原稿文件，一行一个段落
#[derive(Default, Debug)]
pub struct Manuscript {
    pub lines: Vec<String>,
}

impl Manuscript {
    // 读取文件内容
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let contents = read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CheckError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => CheckError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self::from_text(&contents))
    }

    pub fn from_text(contents: &str) -> Self {
        Self {
            lines: contents.lines().map(String::from).collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// 依次检查每个段落。段落之间互不影响，单个段落的错误不会中断后续段落。
    pub fn check<'a>(
        &'a self,
        config: &'a LayoutConfig,
    ) -> impl Iterator<Item = (LineNo, Result<ParagraphCheck, CheckError>)> + 'a {
        self.lines.iter().enumerate().map(move |(idx, raw)| {
            let line = idx.saturating_add(1);
            let result = ParagraphCheck::run(line, raw, config);
            if let Err(err) = &result {
                warn!(line, %err, "paragraph could not be checked");
            }
            (line, result)
        })
    }
}
