use crate::domain::model::{HistoryCursor, LinkRecord, PageRequest};
use crate::domain::ports::LinkService;
use crate::utils::error::Result;

/// 服務端單頁筆數上限
pub const SERVER_PAGE_CAP: u64 = 100;

enum FetchState {
    Init,
    Fetching { group_guid: String },
    Done,
}

/// 逐頁拉取歷史紀錄；每次呼叫 `next_page` 只發出一個請求
pub struct HistoryFetcher<'a, S: LinkService + ?Sized> {
    service: &'a S,
    cursor: HistoryCursor,
    state: FetchState,
}

impl<'a, S: LinkService + ?Sized> HistoryFetcher<'a, S> {
    pub fn new(service: &'a S, requested: Option<u64>) -> Self {
        Self {
            service,
            cursor: HistoryCursor::new(requested),
            state: FetchState::Init,
        }
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, FetchState::Done)
    }

    async fn group_guid(&mut self) -> Result<Option<String>> {
        match &self.state {
            FetchState::Done => return Ok(None),
            FetchState::Fetching { group_guid } => return Ok(Some(group_guid.clone())),
            FetchState::Init => {}
        }

        let user = self.service.current_user().await?;
        tracing::debug!("Listing bitlinks of group {}", user.default_group_guid);
        self.state = FetchState::Fetching {
            group_guid: user.default_group_guid.clone(),
        };
        Ok(Some(user.default_group_guid))
    }

    /// 回傳下一頁；`Ok(None)` 表示結束。發生錯誤後序列即終止，不重試
    ///
    /// 請求送的是頁碼 `page` 與本頁筆數 `size`，服務端以 `(page - 1) * size` 定位。
    /// 最後一頁筆數較少時（例如 `page=3&size=50`）實際對應的是第 101 到 150 筆，
    /// 不是第 201 到 250 筆；`offset` 只用來和 `pagination.total` 比對是否取完，
    /// 不會送上線路。
    pub async fn next_page(&mut self) -> Result<Option<Vec<LinkRecord>>> {
        if self.cursor.exhausted() {
            self.state = FetchState::Done;
        }

        let group_guid = match self.group_guid().await {
            Ok(Some(guid)) => guid,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.state = FetchState::Done;
                return Err(e);
            }
        };

        let request = PageRequest {
            page: self.cursor.page,
            size: self.cursor.next_size(SERVER_PAGE_CAP),
        };
        tracing::debug!("Fetching history page {} (size {})", request.page, request.size);

        let page = match self.service.list_bitlinks(&group_guid, request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("History page {} failed: {}", request.page, e);
                self.state = FetchState::Done;
                return Err(e);
            }
        };

        let mut links = page.links;
        links.truncate(request.size as usize);
        let fetched = links.len() as u64;
        self.cursor.advance(fetched);

        let reached_total = page
            .pagination
            .total
            .map(|total| self.cursor.offset >= total)
            .unwrap_or(false);

        if fetched == 0 || self.cursor.exhausted() || page.pagination.next.is_empty() || reached_total
        {
            self.state = FetchState::Done;
        }

        if links.is_empty() {
            Ok(None)
        } else {
            Ok(Some(links))
        }
    }
}
