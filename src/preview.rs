//! 预览模式：把每个段落按折返结果画进一个带边框的框里。
//!
//! ```text
//!      +--------------------+
//!    1 |吾輩は猫である。名前|
//!      |はまだ無い。        |
//!      +--------------------+
//! ```

use std::io::{Error, Write};
use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::annotatedstring::{AnnotatedString, AnnotationType};
use crate::config::LayoutConfig;
use crate::error::CheckError;
use crate::layout::WrappedLine;
use crate::manuscript::{Manuscript, ParagraphCheck};
use crate::prelude::*;
use crate::terminal::Terminal;

/// 行号栏的宽度（含一个空格）
const GUTTER_WIDTH: usize = 5;

pub fn print_preview<W: Write>(
    terminal: &mut Terminal<W>,
    manuscript: &Manuscript,
    config: &LayoutConfig,
) -> Result<(), Error> {
    let border = border(config.max_width);
    terminal.print_line(&border)?;
    for (line, result) in manuscript.check(config) {
        let rows = match result {
            Ok(check) => paragraph_rows(&check, config),
            Err(err) => vec![error_row(line, &err, config.max_width)],
        };
        for row in &rows {
            terminal.print_annotated(row)?;
            terminal.print("\n")?;
        }
    }
    terminal.print_line(&border)?;
    terminal.execute()
}

fn border(max_width: ColIdx) -> String {
    format!(
        "{:width$}+{}+",
        "",
        "-".repeat(max_width),
        width = GUTTER_WIDTH
    )
}

/// 段落的第一行显示行号，后续行留空
fn gutter(line: LineNo, first_row: bool) -> String {
    if first_row {
        format!("{line:>width$} ", width = GUTTER_WIDTH.saturating_sub(1))
    } else {
        " ".repeat(GUTTER_WIDTH)
    }
}

/// 一个段落的所有行。
///
/// 宽度为 0 的字符不输出；`spacers` 中的字符后补一个空格；
/// 第一段连续的违规字符反显，亲文字加下划线。
pub fn paragraph_rows(check: &ParagraphCheck, config: &LayoutConfig) -> Vec<AnnotatedString> {
    let line = check.paragraph.line();
    let lines = check.layout.lines();
    if lines.is_empty() {
        let mut row = AnnotatedString::from(&gutter(line, true));
        row.push_str("|");
        row.push_str(&" ".repeat(config.max_width));
        row.push_str("|");
        return vec![row];
    }

    let inverted = check.layout.first_flagged_run();
    lines
        .iter()
        .map(|wrapped| {
            let mut row = AnnotatedString::from(&gutter(line, wrapped.index == 0));
            row.push_str("|");
            let positions = push_visible_chars(&mut row, wrapped, config);

            for span in check.paragraph.spans() {
                annotate_chars(
                    &mut row,
                    &positions,
                    span.start..span.end.saturating_add(1),
                    AnnotationType::Ruby,
                );
            }
            if let Some(run) = &inverted {
                annotate_chars(&mut row, &positions, run.clone(), AnnotationType::Violation);
            }

            // 按模拟宽度补齐。不在 spacers 中的 Ambiguous 字符（○、※、希腊字母等）
            // 计为 2 列，终端若按 1 列显示，这一行会比边框短
            row.push_str(&" ".repeat(config.max_width.saturating_sub(wrapped.width())));
            row.push_str("|");
            row
        })
        .collect()
}

/// 写入折返行的可见字符，返回每个字符在行中的字节范围
fn push_visible_chars(
    row: &mut AnnotatedString,
    wrapped: &WrappedLine<'_>,
    config: &LayoutConfig,
) -> Vec<(CharIdx, Range<ByteIdx>)> {
    let mut positions = Vec::with_capacity(wrapped.chars.len());
    let mut buffer = [0u8; 4];
    for (idx, display_char) in wrapped.char_range().zip(wrapped.chars) {
        if !display_char.is_visible() {
            continue;
        }
        let start = row.len();
        row.push_str(display_char.ch.encode_utf8(&mut buffer));
        if display_char.width == 2 && config.is_spacer(display_char.ch) {
            row.push_str(" ");
        }
        positions.push((idx, start..row.len()));
    }
    positions
}

fn annotate_chars(
    row: &mut AnnotatedString,
    positions: &[(CharIdx, Range<ByteIdx>)],
    chars: Range<CharIdx>,
    annotation_type: AnnotationType,
) {
    let mut covered = positions
        .iter()
        .filter(|(idx, _)| chars.contains(idx))
        .map(|(_, bytes)| bytes);
    let Some(first) = covered.next() else {
        return;
    };
    let end = covered.last().map_or(first.end, |last| last.end);
    row.add_annotation(annotation_type, first.start, end);
}

/// 截取不超过 `max_width` 列的前缀
fn truncate_to_width(text: &str, max_width: ColIdx) -> &str {
    let mut width: ColIdx = 0;
    for (idx, ch) in text.char_indices() {
        width = width.saturating_add(ch.width().unwrap_or(0));
        if width > max_width {
            return &text[..idx];
        }
    }
    text
}

fn error_row(line: LineNo, err: &CheckError, max_width: ColIdx) -> AnnotatedString {
    let message = format!("[Error] {err}");
    let message = truncate_to_width(&message, max_width);
    let mut row = AnnotatedString::from(&gutter(line, true));
    row.push_str("|");
    let start = row.len();
    row.push_str(message);
    row.add_annotation(AnnotationType::Violation, start, row.len());
    row.push_str(&" ".repeat(max_width.saturating_sub(message.width())));
    row.push_str("|");
    row
}
