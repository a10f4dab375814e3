use crate::config::Options;
use crate::core::classifier::{host_of, is_shortener_host, normalize_to_url, shortener_slug, slug_of};
use crate::domain::model::ResolvedAction;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

pub const DEFAULT_SHORT_DOMAIN: &str = "bit.ly";

static HOST_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"://(.*?)/").expect("host segment pattern is valid"));

/// 由單一參數決定要展開、縮短、封存或列出歷史
pub fn resolve(arg: &str, options: &Options) -> ResolvedAction {
    if arg.is_empty() {
        return ResolvedAction::History;
    }

    if options.archive {
        return ResolvedAction::Archive(archive_target(arg));
    }

    match normalize_to_url(arg) {
        Some(url) => {
            let on_shortener = host_of(&url)
                .map(|host| is_shortener_host(&host))
                .unwrap_or(false);

            if on_shortener {
                ResolvedAction::Expand(slug_of(&url).unwrap_or_default())
            } else {
                ResolvedAction::Shorten {
                    url,
                    domain: options.domain.clone(),
                }
            }
        }
        None => ResolvedAction::Expand(arg.to_string()),
    }
}

/// 封存目標：已知短網址網域上的網址取路徑，其餘一律當作 slug
pub fn archive_target(arg: &str) -> String {
    normalize_to_url(arg)
        .and_then(|url| shortener_slug(&url))
        .unwrap_or_else(|| arg.to_string())
}

/// `--archive` 沒有任何參數時不做事
pub fn archive_without_target(options: &Options, args: &[String]) -> bool {
    options.archive && args.first().map(|a| a.is_empty()).unwrap_or(true)
}

pub fn slug_to_bitlink(slug: &str, preferred_domain: Option<&str>) -> String {
    format!(
        "https://{}/{}",
        preferred_domain.unwrap_or(DEFAULT_SHORT_DOMAIN),
        slug
    )
}

pub fn make_https(url: &str) -> String {
    match url.strip_prefix("http:") {
        Some(rest) => format!("https:{}", rest),
        None => url.to_string(),
    }
}

/// 只替換第一個 `://host/` 區段
pub fn replace_domain(url: &str, desired_domain: &str) -> String {
    let replacement = format!("://{}/", desired_domain);
    HOST_SEGMENT
        .replace(url, NoExpand(&replacement))
        .into_owned()
}

pub fn normalize_bitlink(url: &str, preferred_domain: Option<&str>) -> String {
    match preferred_domain {
        Some(domain) => make_https(&replace_domain(url, domain)),
        None => make_https(url),
    }
}
