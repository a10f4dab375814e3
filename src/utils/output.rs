use crate::core::resolver::{make_https, normalize_bitlink};
use crate::domain::model::LinkRecord;
use crate::utils::error::Result;
use chrono::{DateTime, FixedOffset, Local};
use colored::Colorize;
use std::io::Write;

/// 終端輸出：一般模式帶顏色，raw 模式原樣輸出服務回傳的 JSON
pub struct Printer<W: Write> {
    out: W,
    raw: bool,
    verbose: bool,
    preferred_domain: Option<String>,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, raw: bool, verbose: bool, preferred_domain: Option<String>) -> Self {
        Self {
            out,
            raw,
            verbose,
            preferred_domain,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bitlink(&self, link: &str) -> String {
        normalize_bitlink(link, self.preferred_domain.as_deref())
    }

    /// 有收到原始 JSON 就照印；HEAD 展開這類自行組出的紀錄才序列化欄位
    fn raw_record(&mut self, item: &LinkRecord) -> Result<()> {
        let json = match &item.raw {
            Some(received) => serde_json::to_string_pretty(received)?,
            None => serde_json::to_string_pretty(item)?,
        };
        writeln!(self.out, "{}", json)?;
        Ok(())
    }

    /// 展開結果與歷史紀錄
    pub fn item(&mut self, item: &LinkRecord) -> Result<()> {
        if self.raw {
            return self.raw_record(item);
        }

        let link = self.bitlink(item.display_link());
        writeln!(self.out, "{} > {}", link.yellow(), item.long_url.red())?;

        if self.verbose {
            if let Some(title) = item.title.as_deref().filter(|t| !t.is_empty()) {
                let title: String = title.chars().filter(|c| *c != '\r' && *c != '\n').collect();
                writeln!(self.out, "   Title: {}", title)?;
            }

            if let Some(tags) = item.tags.as_ref().filter(|t| !t.is_empty()) {
                writeln!(self.out, "   Tags: {}", tags.join(", "))?;
            }

            if let Some(created) = item.created_at.as_deref() {
                writeln!(self.out, "   Created: {}\n", format_created(created))?;
            }
        }

        Ok(())
    }

    pub fn shortened(&mut self, item: &LinkRecord) -> Result<()> {
        if self.raw {
            return self.raw_record(item);
        }

        let link = make_https(&item.link);
        writeln!(self.out, "{} ({})", link.yellow(), item.long_url.bright_black())?;
        Ok(())
    }

    pub fn archived(&mut self, item: &LinkRecord) -> Result<()> {
        if self.raw {
            return self.raw_record(item);
        }

        let link = make_https(&item.link);
        writeln!(self.out, "Archived: {}", link.yellow())?;
        Ok(())
    }

    pub fn not_a_bitlink(&mut self, what: &str) -> Result<()> {
        writeln!(self.out, "{} is not a bitlink", what.bright_black())?;
        Ok(())
    }

    pub fn not_yours(&mut self, what: &str) -> Result<()> {
        writeln!(self.out, "{} is not your bitlink", what.bright_black())?;
        Ok(())
    }

    pub fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message.red())?;
        Ok(())
    }
}

/// Bitly 的時間格式是 `2019-01-01T00:00:00+0000`，不是嚴格的 RFC 3339
fn parse_created(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

fn format_created(value: &str) -> String {
    match parse_created(value) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%a %b %d %Y %H:%M:%S %Z")
            .to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, long_url: &str) -> LinkRecord {
        LinkRecord {
            link: link.to_string(),
            long_url: long_url.to_string(),
            ..Default::default()
        }
    }

    fn printed<F>(raw: bool, verbose: bool, domain: Option<&str>, f: F) -> String
    where
        F: FnOnce(&mut Printer<Vec<u8>>),
    {
        colored::control::set_override(false);
        let mut printer = Printer::new(Vec::new(), raw, verbose, domain.map(String::from));
        f(&mut printer);
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_item_upgrades_to_https() {
        let out = printed(false, false, None, |p| {
            p.item(&record("http://bit.ly/abc", "https://example.com/"))
                .unwrap()
        });
        assert_eq!(out, "https://bit.ly/abc > https://example.com/\n");
    }

    #[test]
    fn test_item_prefers_custom_bitlink_and_domain() {
        let mut item = record("http://bit.ly/abc", "https://example.com/");
        item.custom_bitlinks = Some(vec!["http://bit.ly/custom".to_string()]);
        let out = printed(false, false, Some("j.mp"), |p| p.item(&item).unwrap());
        assert_eq!(out, "https://j.mp/custom > https://example.com/\n");
    }

    #[test]
    fn test_verbose_item_includes_metadata() {
        let mut item = record("https://bit.ly/abc", "https://example.com/");
        item.title = Some("Hello\r\nWorld".to_string());
        item.tags = Some(vec!["a".to_string(), "b".to_string()]);
        item.created_at = Some("2020-01-02T03:04:05+0000".to_string());

        let out = printed(false, true, None, |p| p.item(&item).unwrap());
        assert!(out.contains("   Title: HelloWorld\n"));
        assert!(out.contains("   Tags: a, b\n"));
        assert!(out.contains("   Created: "));
        assert!(out.contains("2020"));
    }

    #[test]
    fn test_verbose_item_skips_empty_metadata() {
        let mut item = record("https://bit.ly/abc", "https://example.com/");
        item.title = Some(String::new());
        item.tags = Some(vec![]);
        let out = printed(false, true, None, |p| p.item(&item).unwrap());
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_raw_mode_prints_json_as_received() {
        let received = serde_json::json!({
            "link": "http://bit.ly/abc",
            "long_url": "https://example.com/",
            "title": null,
            "created_at": null,
            "id": "bit.ly/abc"
        });
        let item: LinkRecord = serde_json::from_value(received.clone()).unwrap();

        let out = printed(true, false, Some("j.mp"), |p| {
            p.item(&item).unwrap();
            p.archived(&item).unwrap();
        });
        let mut stream = serde_json::Deserializer::from_str(&out).into_iter::<serde_json::Value>();
        assert_eq!(stream.next().unwrap().unwrap(), received);
        assert_eq!(stream.next().unwrap().unwrap(), received);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_raw_mode_without_received_json_serializes_fields() {
        let item = record("https://bit.ly/abc", "https://example.com/");
        let out = printed(true, false, None, |p| p.item(&item).unwrap());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"link": "https://bit.ly/abc", "long_url": "https://example.com/"})
        );
    }

    #[test]
    fn test_shortened_and_archived_lines() {
        let item = record("http://bit.ly/new", "https://example.com/long");
        let out = printed(false, false, None, |p| {
            p.shortened(&item).unwrap();
            p.archived(&item).unwrap();
        });
        assert_eq!(
            out,
            "https://bit.ly/new (https://example.com/long)\nArchived: https://bit.ly/new\n"
        );
    }

    #[test]
    fn test_shortened_and_archived_keep_service_domain() {
        let item = record("http://bit.ly/new", "https://example.com/long");
        let out = printed(false, false, Some("j.mp"), |p| {
            p.shortened(&item).unwrap();
            p.archived(&item).unwrap();
            p.item(&item).unwrap();
        });
        assert_eq!(
            out,
            "https://bit.ly/new (https://example.com/long)\n\
             Archived: https://bit.ly/new\n\
             https://j.mp/new > https://example.com/long\n"
        );
    }

    #[test]
    fn test_informational_lines() {
        let out = printed(false, false, None, |p| {
            p.not_a_bitlink("https://bit.ly/404").unwrap();
            p.not_yours("abc").unwrap();
        });
        assert_eq!(
            out,
            "https://bit.ly/404 is not a bitlink\nabc is not your bitlink\n"
        );
    }

    #[test]
    fn test_parse_created_accepts_both_offsets() {
        assert!(parse_created("2020-01-02T03:04:05+0000").is_some());
        assert!(parse_created("2020-01-02T03:04:05+00:00").is_some());
        assert_eq!(format_created("yesterday"), "yesterday");
    }
}
