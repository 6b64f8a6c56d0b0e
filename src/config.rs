use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 默认配置文件名，在当前工作目录下查找
pub const CONFIG_FILE_NAME: &str = "kinsoku.toml";

/// 一行的最大显示宽度。全角 1 字 = 宽度 2，所以 80 相当于全角 40 字。
pub const DEFAULT_MAX_WIDTH: usize = 80;
/// 最终折返行允许的最小宽度（全角 3 字 = 6）
pub const DEFAULT_MIN_LAST_LINE_WIDTH: usize = 6;

const DEFAULT_LINE_START_PROHIBITED: &str =
    "、。）」』】〕〉》｝ー々ぁぃぅぇぉっゃゅょァィゥェォッャュョ゛゜";
const DEFAULT_LINE_END_PROHIBITED: &str = "「『（【〔〈《｛";
const DEFAULT_FORCED_WIDE: &str = "☀☁☂☃★☆♡♥♪♫☺";
const DEFAULT_SPACERS: &str = "…‥―─‐–—“”‘’";

/// 排版检查所用的全部常量。
///
/// 加载后不可变，以引用的形式传给标注器、模拟器和规则检查器，
/// 所以每个段落的处理都没有副作用。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    // 折返宽度
    pub max_width: usize,
    // 最终行必须超过的宽度
    pub min_last_line_width: usize,
    // 行头禁则字符
    pub line_start_prohibited: String,
    // 行末禁则字符
    pub line_end_prohibited: String,
    // 强制按宽度 2 计算的符号
    pub forced_wide: String,
    // 预览时需要补一个空格的字符（实际渲染比分配宽度窄）
    pub spacers: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            min_last_line_width: DEFAULT_MIN_LAST_LINE_WIDTH,
            line_start_prohibited: DEFAULT_LINE_START_PROHIBITED.to_string(),
            line_end_prohibited: DEFAULT_LINE_END_PROHIBITED.to_string(),
            forced_wide: DEFAULT_FORCED_WIDE.to_string(),
            spacers: DEFAULT_SPACERS.to_string(),
        }
    }
}

impl LayoutConfig {
    /// 从指定路径加载配置。文件不存在时返回 `Ok(None)`。
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                config_path: config_path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        Ok(Some(config))
    }

    /// 加载工作目录下的 `kinsoku.toml`，没有就用默认值。
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(Self::config_path())?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            config_path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 全角字符在空行上必须放得下，否则折返会产生空行。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_width must be at least 2, got {}",
                self.max_width
            )));
        }
        Ok(())
    }

    pub fn is_line_start_prohibited(&self, ch: char) -> bool {
        self.line_start_prohibited.contains(ch)
    }

    pub fn is_line_end_prohibited(&self, ch: char) -> bool {
        self.line_end_prohibited.contains(ch)
    }

    pub fn is_forced_wide(&self, ch: char) -> bool {
        self.forced_wide.contains(ch)
    }

    pub fn is_spacer(&self, ch: char) -> bool {
        self.spacers.contains(ch)
    }
}
