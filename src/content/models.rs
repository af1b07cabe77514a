use chrono::{NaiveDate, NaiveDateTime};

/// WordPress的`{ "rendered": "..." }`字段
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlayCredit {
    #[serde(default)]
    pub play: Option<String>,
    #[serde(default)]
    pub playwright: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct IssueFields {
    #[serde(default)]
    pub issue_number: Option<u32>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub content: Vec<PlayCredit>,
    #[serde(default)]
    pub preface: Option<String>,
}

/// 一期刊物
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Issue {
    pub id: u64,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub acf: IssueFields,
    /// `_embed`带回的关联资源（封面图等），原样透传
    #[serde(default, rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct EventFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sticker: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Event {
    pub id: u64,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub acf: EventFields,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default, rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<serde_json::Value>,
}

/// 普通页面，自定义字段不做约束
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Page {
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub acf: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct OpenCallFields {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub application_deadline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct OpenCall {
    pub id: u64,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub acf: OpenCallFields,
}

impl OpenCall {
    /// 截止时间已过则视为过期；缺失或无法解析时不算过期
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        parse_deadline(&self.acf.application_deadline).is_some_and(|deadline| deadline < now)
    }
}

/// 支持ACF常见的几种日期格式，只有日期时取当天结束
fn parse_deadline(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y%m%d"]
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(|date| date.and_hms_opt(23, 59, 59))
        })
}

/// 返回给页面的open call，附带是否过期
#[derive(Debug, Clone, serde::Serialize)]
pub struct OpenCallView {
    #[serde(flatten)]
    pub open_call: OpenCall,
    pub is_expired: bool,
}
