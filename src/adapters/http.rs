use crate::domain::model::{HistoryPage, LinkRecord, PageRequest, User};
use crate::domain::ports::LinkService;
use crate::utils::error::{BitlyError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api-ssl.bitly.com/v4";

/// 覆蓋 API 位址的環境變數
pub const API_URL_ENV: &str = "BITLY_API_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 以 bit.ly 作為 API 路徑中的網域，其他網域的短網址也透過它查詢
const API_LINK_DOMAIN: &str = "bit.ly";

pub struct BitlyClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl BitlyClient {
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bitly-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method, &url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.as_u16() >= 300 {
            return Err(BitlyError::Service {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    fn bitlink_path(slug: &str) -> String {
        format!("bitlinks/{}/{}", API_LINK_DOMAIN, slug)
    }
}

#[async_trait]
impl LinkService for BitlyClient {
    async fn get_bitlink(&self, slug: &str) -> Result<LinkRecord> {
        self.request(Method::GET, &Self::bitlink_path(slug), &[], None)
            .await
    }

    async fn shorten(&self, long_url: &str, domain: Option<&str>) -> Result<LinkRecord> {
        let mut body = serde_json::json!({ "long_url": long_url });
        if let Some(domain) = domain {
            body["domain"] = serde_json::Value::String(domain.to_string());
        }

        self.request(Method::POST, "bitlinks", &[], Some(body)).await
    }

    async fn archive(&self, slug: &str) -> Result<LinkRecord> {
        let body = serde_json::json!({ "edit": "archived", "archived": true });
        self.request(Method::PATCH, &Self::bitlink_path(slug), &[], Some(body))
            .await
    }

    async fn current_user(&self) -> Result<User> {
        self.request(Method::GET, "user", &[], None).await
    }

    async fn list_bitlinks(&self, group_guid: &str, page: PageRequest) -> Result<HistoryPage> {
        let path = format!("groups/{}/bitlinks", group_guid);
        let query = [("size", page.size.to_string()), ("page", page.page.to_string())];
        self.request(Method::GET, &path, &query, None).await
    }

    async fn follow_redirects(&self, link: &str) -> Result<String> {
        tracing::debug!("HEAD {}", link);
        let response = self.client.head(link).send().await?;
        Ok(response.url().to_string())
    }
}
