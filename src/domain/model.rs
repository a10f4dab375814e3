use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 服務回傳的一筆短網址紀錄；`raw` 保存收到的原始 JSON，raw 輸出時原樣印出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct LinkRecord {
    pub link: String,
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_bitlinks: Option<Vec<String>>,
    #[serde(skip)]
    pub raw: Option<Value>,
}

#[derive(Deserialize)]
struct LinkFields {
    #[serde(default)]
    link: String,
    #[serde(default)]
    long_url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    custom_bitlinks: Option<Vec<String>>,
}

impl TryFrom<Value> for LinkRecord {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = LinkFields::deserialize(&value)?;
        Ok(Self {
            link: fields.link,
            long_url: fields.long_url,
            title: fields.title,
            tags: fields.tags,
            created_at: fields.created_at,
            custom_bitlinks: fields.custom_bitlinks,
            raw: Some(value),
        })
    }
}

impl LinkRecord {
    /// 有自訂短網址時優先顯示第一個
    pub fn display_link(&self) -> &str {
        self.custom_bitlinks
            .as_ref()
            .and_then(|links| links.first())
            .map(String::as_str)
            .unwrap_or(&self.link)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    Expand(String),
    Shorten { url: String, domain: Option<String> },
    Archive(String),
    History,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub login: Option<String>,
    pub default_group_guid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

/// 歷史查詢的游標，只由 `HistoryFetcher` 持有
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    pub page: u64,
    pub offset: u64,
    /// `None` 代表不限筆數
    pub remaining: Option<u64>,
}

impl HistoryCursor {
    pub fn new(requested: Option<u64>) -> Self {
        Self {
            page: 1,
            offset: 0,
            remaining: requested,
        }
    }

    pub fn exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    pub fn next_size(&self, cap: u64) -> u64 {
        match self.remaining {
            Some(remaining) => remaining.min(cap),
            None => cap,
        }
    }

    pub fn advance(&mut self, fetched: u64) {
        self.page += 1;
        self.offset += fetched;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(fetched);
        }
    }
}
