//! 通用文本校验

use std::fmt;

/// 文本字段违反的规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    Empty,
    TooLong(usize),
}

impl fmt::Display for TextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextRule::Empty => write!(f, "不能为空"),
            TextRule::TooLong(max) => write!(f, "长度不能超过{}字符", max),
        }
    }
}

/// 去除首尾空白后检查非空与最大字符数
pub fn bounded_text(value: &str, max_chars: usize) -> Result<String, TextRule> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextRule::Empty);
    }
    if trimmed.chars().count() > max_chars {
        return Err(TextRule::TooLong(max_chars));
    }
    Ok(trimmed.to_string())
}
