use std::path::PathBuf;
use thiserror::Error;

use crate::annotator::RubySpan;
use crate::prelude::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// 检查过程中的错误。
///
/// 只有文件级别的错误（`FileNotFound`、`Read`）会终止整个运行，
/// `OverlappingRubySpans` 只影响所在的段落。配置错误单独由 `ConfigError` 表示。
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("ruby spans overlap on line {line}: {first} and {second}")]
    OverlappingRubySpans {
        line: LineNo,
        first: RubySpan,
        second: RubySpan,
    },
}

impl CheckError {
    /// 是否应终止整个文件的处理
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::OverlappingRubySpans { .. })
    }
}
