//! 模型回复解析
//!
//! 模型回复是自由文本，约定最后一个非空行形如：
//!
//! ```text
//! 추천 콘텐츠: <平台> <标题>
//! ```
//!
//! 解析分两步：先识别行首标记（[`RecommendationMarker`]），再按首个空白切分平台与标题。
//! 任何无法识别的情况都返回 `None`，调用方不区分"没有标记"与"解析失败"。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 标记后的分隔符：任意空白与冒号
static MARKER_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[:\s]*").expect("marker separator pattern is valid"));

const QUOTES: &[char] = &['"', '\''];

/// 推荐内容行的行首标记，两种写法含义相同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationMarker {
    /// `추천 콘텐츠`
    Standard,
    /// `추천 컨텐츠`
    Colloquial,
}

impl RecommendationMarker {
    pub const ALL: [RecommendationMarker; 2] = [Self::Standard, Self::Colloquial];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "추천 콘텐츠",
            Self::Colloquial => "추천 컨텐츠",
        }
    }

    /// 识别行首标记
    pub fn detect(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|marker| line.starts_with(marker.as_str()))
    }

    /// 去掉标记及其后的冒号和空白
    pub fn strip<'a>(self, line: &'a str) -> Option<&'a str> {
        let rest = line.strip_prefix(self.as_str())?;
        let separator_len = MARKER_SEPARATOR.find(rest).map_or(0, |m| m.end());
        Some(&rest[separator_len..])
    }
}

/// 解析出的推荐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 命中的标记
    pub marker: RecommendationMarker,
    /// 平台名（仅用于展示，可能为空）
    pub platform: String,
    /// 内容标题
    pub title: String,
}

/// 提取推荐内容标题
pub fn extract_recommendation(raw_response: &str) -> Option<String> {
    parse_recommendation(raw_response).map(|r| r.title)
}

/// 解析推荐行，保留平台名
pub fn parse_recommendation(raw_response: &str) -> Option<Recommendation> {
    let Some(line) = last_non_empty_line(raw_response) else {
        tracing::debug!("Model response is empty, no recommendation");
        return None;
    };
    tracing::debug!(line, "Model response last line");

    let Some(marker) = RecommendationMarker::detect(line) else {
        tracing::debug!(line, "No recommendation marker on last line");
        return None;
    };

    let rest = marker.strip(line)?;
    let (platform, raw_title) = split_platform(rest);
    let Some(title) = clean_title(raw_title) else {
        tracing::debug!(line, "Recommendation marker found but title is empty");
        return None;
    };

    tracing::debug!(platform, title = %title, "Extracted recommendation");
    Some(Recommendation {
        marker,
        platform: platform.to_string(),
        title,
    })
}

fn last_non_empty_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

/// 按首个空白切分为 `(平台, 标题)`；没有空白时整段作为标题，平台为空
pub fn split_platform(rest: &str) -> (&str, &str) {
    match rest.split_once(char::is_whitespace) {
        Some((platform, title)) => (platform, title),
        None => ("", rest),
    }
}

/// 去掉首尾空白以及首尾各一个引号
fn clean_title(raw: &str) -> Option<String> {
    let title = raw.trim();
    let title = title.strip_prefix(QUOTES).unwrap_or(title);
    let title = title.strip_suffix(QUOTES).unwrap_or(title).trim();
    (!title.is_empty()).then(|| title.to_string())
}
