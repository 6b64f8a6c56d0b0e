//! 把一行原稿转换成显示字符序列和注音区间。
//!
//! 处理顺序：去掉行头的 `#`，去掉行末的 `[...]`，展开 `《《...》》` 强调，
//! 最后扫描 `｜亲文字《注音》` 形式的注音标记。

use crate::prelude::*;

pub use rubyspan::RubySpan;

mod rubyspan;

/// 注音的起始分隔符
pub const RUBY_DIVIDER: char = '｜';
pub const RUBY_OPEN: char = '《';
pub const RUBY_CLOSE: char = '》';

const EMPHASIS_OPEN: &str = "《《";
const EMPHASIS_CLOSE: &str = "》》";

/// 标注器的输出：去除标记后的显示文本以及注音区间（按出现顺序）。
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Annotation {
    pub text: Vec<char>,
    pub spans: Vec<RubySpan>,
}

impl Annotation {
    /// 空或者全是空白，没有需要检查的内容
    pub fn is_blank(&self) -> bool {
        self.text.iter().all(|ch| ch.is_whitespace())
    }

    pub fn display_text(&self) -> String {
        self.text.iter().collect()
    }
}

/// 扫描注音标记时的状态
#[derive(Copy, Clone, Debug)]
enum ScanState {
    // 标记之外
    Outside,
    // 读过分隔符，正在读亲文字
    Parent { divider: CharIdx },
    // 读过 `《`，正在读注音
    Ruby { divider: CharIdx, open: CharIdx },
}

pub fn annotate(raw: &str) -> Annotation {
    let text = strip_heading(raw);
    let text = strip_trailing_metadata(text);
    let text = collapse_emphasis(text);
    extract_ruby(&text)
}

/// 去掉行头连续的 `#` 以及紧随其后的空白
fn strip_heading(text: &str) -> &str {
    if text.starts_with('#') {
        text.trim_start_matches('#').trim_start()
    } else {
        text
    }
}

/// 去掉行末的 `空白 + [...] + 空白`，只去掉一组。
///
/// 括号内不能含 `]`，且 `[` 前面至少有一个空白；有多个候选时取最左边的，
/// 与 `\s+\[[^\]]+\]\s*$` 的匹配结果一致。
fn strip_trailing_metadata(text: &str) -> &str {
    let Some(body) = text.trim_end().strip_suffix(']') else {
        return text;
    };
    // 内容里不会出现 `]`，候选 `[` 只能在最后一个 `]` 之后
    let search_from = body.rfind(']').map_or(0, |idx| idx.saturating_add(1));

    for (offset, ch) in body[search_from..].char_indices() {
        if ch != '[' {
            continue;
        }
        let open = search_from.saturating_add(offset);
        // `[` 之后至少要有一个字符
        if open.saturating_add(1) >= body.len() {
            break;
        }
        let before = &text[..open];
        if before.ends_with(char::is_whitespace) {
            return before.trim_end();
        }
    }
    text
}

/// 把 `《《内容》》` 展开成内容本身。取最短匹配，内容至少一个字符。
fn collapse_emphasis(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(EMPHASIS_OPEN) {
        let after = &rest[open.saturating_add(EMPHASIS_OPEN.len())..];
        let Some(first) = after.chars().next() else {
            break;
        };
        let Some(close) = after[first.len_utf8()..].find(EMPHASIS_CLOSE) else {
            break;
        };
        let close = close.saturating_add(first.len_utf8());
        result.push_str(&rest[..open]);
        result.push_str(&after[..close]);
        rest = &after[close.saturating_add(EMPHASIS_CLOSE.len())..];
    }
    result.push_str(rest);
    result
}

/// 从左到右扫描注音标记，一次遍历完成。
///
/// 亲文字不能含 `《`、`》` 或空白，注音不能含 `》`，两者都不能为空。
/// 不成立的标记原样保留在显示文本中。
fn extract_ruby(text: &str) -> Annotation {
    let source: Vec<char> = text.chars().collect();
    let mut annotation = Annotation::default();
    let mut last_end: CharIdx = 0;
    let mut state = ScanState::Outside;

    for (idx, &ch) in source.iter().enumerate() {
        state = match state {
            ScanState::Outside if ch == RUBY_DIVIDER => ScanState::Parent { divider: idx },
            ScanState::Outside => ScanState::Outside,
            ScanState::Parent { divider } if ch == RUBY_OPEN => {
                if idx > divider.saturating_add(1) {
                    ScanState::Ruby { divider, open: idx }
                } else {
                    ScanState::Outside
                }
            }
            ScanState::Parent { .. } if ch == RUBY_CLOSE || ch.is_whitespace() => {
                ScanState::Outside
            }
            // 亲文字中可以再出现分隔符，仍属于同一个候选
            ScanState::Parent { divider } => ScanState::Parent { divider },
            ScanState::Ruby { divider, open } if ch == RUBY_CLOSE => {
                if idx > open.saturating_add(1) {
                    annotation.text.extend_from_slice(&source[last_end..divider]);
                    let start = annotation.text.len();
                    annotation
                        .text
                        .extend_from_slice(&source[divider.saturating_add(1)..open]);
                    annotation.spans.push(RubySpan {
                        start,
                        end: annotation.text.len().saturating_sub(1),
                        ruby_width: idx.saturating_sub(open).saturating_sub(1),
                    });
                    last_end = idx.saturating_add(1);
                }
                ScanState::Outside
            }
            ScanState::Ruby { divider, open } => ScanState::Ruby { divider, open },
        };
    }

    annotation.text.extend_from_slice(&source[last_end..]);
    annotation
}
