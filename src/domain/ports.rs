use crate::domain::model::{HistoryPage, LinkRecord, PageRequest, User};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端短網址服務
#[async_trait]
pub trait LinkService: Send + Sync {
    async fn get_bitlink(&self, slug: &str) -> Result<LinkRecord>;
    async fn shorten(&self, long_url: &str, domain: Option<&str>) -> Result<LinkRecord>;
    async fn archive(&self, slug: &str) -> Result<LinkRecord>;
    async fn current_user(&self) -> Result<User>;
    async fn list_bitlinks(&self, group_guid: &str, page: PageRequest) -> Result<HistoryPage>;
    /// 不經 API，直接對短網址發 HEAD 並跟隨轉址，回傳最終網址
    async fn follow_redirects(&self, link: &str) -> Result<String>;
}

/// 存取 token 的持久化設定檔
pub trait TokenStore {
    fn load_key(&self) -> Option<String>;
    fn save_key(&self, key: &str) -> Result<String>;
}
