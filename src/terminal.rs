use crossterm::style::{
    Attribute as CrosstermAttribute, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::{queue, Command};
use std::io::{stdout, Error, Stdout, Write};

use crate::annotatedstring::AnnotatedString;
use attribute::Attribute;

mod attribute;

/// 输出终端。
///
/// 所有输出先排队，`execute` 时统一刷新。写入目标可以是标准输出，
/// 也可以是任意 `Write`（测试时用 `Vec<u8>`）。
pub struct Terminal<W: Write> {
    out: W,
}

impl Terminal<Stdout> {
    pub fn stdout() -> Self {
        Self { out: stdout() }
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // 打印
    pub fn print(&mut self, string: &str) -> Result<(), Error> {
        self.queue_command(Print(string))
    }

    // 打印一整行
    pub fn print_line(&mut self, string: &str) -> Result<(), Error> {
        self.print(string)?;
        self.print("\n")
    }

    /// 按标注逐段打印，每段结束后恢复默认样式
    pub fn print_annotated(&mut self, annotated_string: &AnnotatedString) -> Result<(), Error> {
        for part in annotated_string {
            if let Some(annotation_type) = part.annotation_type {
                let attribute: Attribute = annotation_type.into();
                self.set_attribute(&attribute)?;
                self.print(part.string)?;
                self.reset_attribute()?;
            } else {
                self.print(part.string)?;
            }
        }
        Ok(())
    }

    fn set_attribute(&mut self, attribute: &Attribute) -> Result<(), Error> {
        if let Some(foreground_color) = attribute.foreground {
            self.queue_command(SetForegroundColor(foreground_color))?;
        }
        if attribute.reverse {
            self.queue_command(SetAttribute(CrosstermAttribute::Reverse))?;
        }
        if attribute.underline {
            self.queue_command(SetAttribute(CrosstermAttribute::Underlined))?;
        }
        Ok(())
    }

    fn reset_attribute(&mut self) -> Result<(), Error> {
        self.queue_command(SetAttribute(CrosstermAttribute::Reset))?;
        self.queue_command(ResetColor)
    }

    // 执行刷新缓冲区
    pub fn execute(&mut self) -> Result<(), Error> {
        self.out.flush()
    }

    // 执行命令
    fn queue_command<T: Command>(&mut self, command: T) -> Result<(), Error> {
        queue!(self.out, command)
    }
}
