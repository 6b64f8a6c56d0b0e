//! 日文原稿的排版检查。
//!
//! 每行原稿是一个段落：先去掉标记得到显示文本和注音区间，再按固定宽度
//! 模拟折返，最后检查注音完整性、最终行长度、半角奇数和行头行末禁则。

pub mod annotatedstring;
pub mod annotator;
pub mod config;
pub mod error;
pub mod layout;
pub mod manuscript;
pub mod paragraph;
pub mod prelude;
pub mod preview;
pub mod report;
pub mod rules;
pub mod terminal;

pub use config::LayoutConfig;
pub use error::{CheckError, ConfigError};
pub use manuscript::{Manuscript, ParagraphCheck};
pub use rules::{Violation, ViolationKind};
