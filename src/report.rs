//! 报告模式：每个有问题的段落输出一行。

use std::io::{Error, Write};

use crate::config::LayoutConfig;
use crate::error::CheckError;
use crate::manuscript::Manuscript;
use crate::prelude::*;
use crate::rules::Violation;
use crate::terminal::Terminal;

pub fn format_violation(violation: &Violation) -> String {
    format!(
        "L{:>4}: [{}] {}",
        violation.line, violation.kind, violation.description
    )
}

pub fn format_error(line: LineNo, err: &CheckError) -> String {
    format!("L{line:>4}: [Error] {err}")
}

/// 每个段落取第一个违规，按行号顺序返回
pub fn report_lines(manuscript: &Manuscript, config: &LayoutConfig) -> Vec<String> {
    manuscript
        .check(config)
        .filter_map(|(line, result)| match result {
            Ok(check) => check.first_violation().map(format_violation),
            Err(err) => Some(format_error(line, &err)),
        })
        .collect()
}

pub fn print_report<W: Write>(
    terminal: &mut Terminal<W>,
    manuscript: &Manuscript,
    config: &LayoutConfig,
) -> Result<(), Error> {
    for line in report_lines(manuscript, config) {
        terminal.print_line(&line)?;
    }
    terminal.execute()
}
