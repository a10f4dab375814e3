use crate::config::Options;
use crate::core::history::HistoryFetcher;
use crate::core::resolver::{archive_without_target, resolve, slug_to_bitlink};
use crate::domain::model::{LinkRecord, ResolvedAction};
use crate::domain::ports::LinkService;
use crate::utils::error::Result;
use crate::utils::output::Printer;
use std::io::Write;

pub struct BitlyEngine<S: LinkService, W: Write> {
    service: S,
    options: Options,
    printer: Printer<W>,
}

impl<S: LinkService, W: Write> BitlyEngine<S, W> {
    pub fn new(service: S, options: Options, printer: Printer<W>) -> Self {
        Self {
            service,
            options,
            printer,
        }
    }

    pub fn into_printer(self) -> Printer<W> {
        self.printer
    }

    /// 依序處理每個參數；沒有參數時列出歷史。未處理的錯誤會中止剩下的參數
    pub async fn run(&mut self, args: &[String]) -> Result<()> {
        if archive_without_target(&self.options, args) {
            tracing::debug!("--archive without a bitlink, nothing to do");
            return Ok(());
        }

        if args.is_empty() {
            return self.execute(ResolvedAction::History).await;
        }

        for arg in args {
            let action = resolve(arg, &self.options);
            tracing::debug!("{} => {:?}", arg, action);
            self.execute(action).await?;
        }

        Ok(())
    }

    pub async fn execute(&mut self, action: ResolvedAction) -> Result<()> {
        match action {
            ResolvedAction::Expand(slug) => self.expand(&slug).await,
            ResolvedAction::Shorten { url, domain } => self.shorten(&url, domain.as_deref()).await,
            ResolvedAction::Archive(slug) => self.archive(&slug).await,
            ResolvedAction::History => self.history().await,
        }
    }

    async fn expand(&mut self, slug: &str) -> Result<()> {
        match self.service.get_bitlink(slug).await {
            Ok(item) => self.printer.item(&item),
            Err(e) if e.is_not_found() => {
                let link = slug_to_bitlink(slug, self.options.domain.as_deref());
                self.printer.not_a_bitlink(&link)
            }
            Err(e) if e.is_forbidden() => {
                // 別人的短網址，API 不給看，改用 HEAD 跟隨轉址
                tracing::info!("{} belongs to another account, following redirects", slug);
                self.expand_manually(slug).await
            }
            Err(e) => Err(e),
        }
    }

    async fn expand_manually(&mut self, slug: &str) -> Result<()> {
        let link = slug_to_bitlink(slug, self.options.domain.as_deref());
        let long_url = self.service.follow_redirects(&link).await?;

        self.printer.item(&LinkRecord {
            link,
            long_url,
            ..Default::default()
        })
    }

    async fn shorten(&mut self, long_url: &str, domain: Option<&str>) -> Result<()> {
        let item = self.service.shorten(long_url, domain).await?;
        self.printer.shortened(&item)
    }

    async fn archive(&mut self, slug: &str) -> Result<()> {
        match self.service.archive(slug).await {
            Ok(item) => self.printer.archived(&item),
            Err(e) if e.is_forbidden() => self.printer.not_yours(slug),
            Err(e) if e.is_not_found() => self.printer.not_a_bitlink(slug),
            Err(e) => Err(e),
        }
    }

    async fn history(&mut self) -> Result<()> {
        let mut fetcher = HistoryFetcher::new(&self.service, self.options.count);
        let mut shown = 0usize;

        while let Some(links) = fetcher.next_page().await? {
            for item in &links {
                self.printer.item(item)?;
            }
            shown += links.len();
        }

        tracing::debug!("Listed {} bitlinks", shown);
        Ok(())
    }
}
