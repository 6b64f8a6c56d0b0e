/// 显示字符序列中的索引（一个码点一个位置）
pub type CharIdx = usize;
/// 折返行索引，从 0 开始
pub type WrapIdx = usize;
/// 折返行内的列偏移（以显示宽度计）
pub type ColIdx = usize;
/// 源文件中的行号，从 1 开始
pub type LineNo = usize;
pub type ByteIdx = usize;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
