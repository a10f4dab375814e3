pub mod rc_file;

use crate::utils::error::Result;
use crate::utils::validation::{validate_hostname, Validate};
use clap::Parser;
use std::path::PathBuf;

/// `--count` 的值；無法解析時視為不限筆數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Unlimited,
    Limited(u64),
}

impl Count {
    pub fn limit(self) -> Option<u64> {
        match self {
            Count::Unlimited => None,
            Count::Limited(n) => Some(n),
        }
    }
}

/// 行為同 `parseInt`：取開頭的整數，負數夾到 0，非數字視為不限
pub fn parse_count(value: &str) -> std::result::Result<Count, String> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() {
        return Ok(Count::Unlimited);
    }
    if negative {
        return Ok(Count::Limited(0));
    }

    Ok(Count::Limited(digits.parse().unwrap_or(u64::MAX)))
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bitly", version)]
#[command(about = "Use Bitly from the command line")]
pub struct CliConfig {
    #[arg(
        short,
        long,
        value_name = "n",
        value_parser = parse_count,
        allow_negative_numbers = true,
        default_value = "all",
        help = "limit results (same as -<n>)"
    )]
    pub count: Count,

    #[arg(short, long, help = "archive the following bitlink")]
    pub archive: bool,

    #[arg(long, value_name = "key", help = "provide a Bitly access token")]
    pub key: Option<String>,

    #[arg(long, help = "ask for Bitly access token (overrides --key)")]
    pub ask: bool,

    #[arg(long, help = "save Bitly access token (use with --key or --ask)")]
    pub save: bool,

    #[arg(
        long,
        value_name = "value",
        help = "preferred Bitly domain for shortening: bit.ly, bitly.com, j.mp"
    )]
    pub domain: Option<String>,

    #[arg(short, long, help = "verbose output")]
    pub verbose: bool,

    #[arg(long, help = "raw output")]
    pub raw: bool,

    #[arg(long, value_name = "file", help = "read and save the access token from this file")]
    pub config: Option<PathBuf>,

    #[arg(value_name = "args")]
    pub args: Vec<String>,
}

/// 解析一次後不可變的選項，一路傳給需要的元件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub count: Option<u64>,
    pub archive: bool,
    pub key: Option<String>,
    pub ask: bool,
    pub save: bool,
    pub domain: Option<String>,
    pub verbose: bool,
    pub raw: bool,
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// 先取出 `-<n>` 簡寫再交給 clap
    pub fn parse_with_shorthand<I>(argv: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        let (argv, shorthand) = extract_count_shorthand(argv.into_iter().collect());
        let mut config = Self::try_parse_from(argv)?;
        if let Some(n) = shorthand {
            config.count = Count::Limited(n);
        }
        Ok(config)
    }

    pub fn into_parts(self) -> (Options, Vec<String>) {
        let options = Options {
            count: self.count.limit(),
            archive: self.archive,
            key: self.key,
            ask: self.ask,
            save: self.save,
            domain: self.domain,
            verbose: self.verbose,
            raw: self.raw,
            config_path: self.config,
        };
        (options, self.args)
    }
}

const VALUE_FLAGS: &[&str] = &["-c", "--count", "--key", "--domain", "--config"];

/// 移除所有 `-<n>` 參數，最後出現的那個生效
pub fn extract_count_shorthand(argv: Vec<String>) -> (Vec<String>, Option<u64>) {
    let mut kept: Vec<String> = Vec::with_capacity(argv.len());
    let mut count = None;

    for (i, arg) in argv.into_iter().enumerate() {
        let is_value = kept
            .last()
            .is_some_and(|prev| VALUE_FLAGS.contains(&prev.as_str()));
        let shorthand = arg
            .strip_prefix('-')
            .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .map(|digits| digits.parse::<u64>().unwrap_or(u64::MAX));

        match shorthand {
            Some(n) if i > 0 && !is_value => count = Some(n),
            _ => kept.push(arg),
        }
    }

    (kept, count)
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        if let Some(domain) = &self.domain {
            validate_hostname("domain", domain)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("bitly")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("10"), Ok(Count::Limited(10)));
        assert_eq!(parse_count("-5"), Ok(Count::Limited(0)));
        assert_eq!(parse_count("abc"), Ok(Count::Unlimited));
        assert_eq!(parse_count("0"), Ok(Count::Limited(0)));
        assert_eq!(parse_count("12abc"), Ok(Count::Limited(12)));
        assert_eq!(parse_count(" 7"), Ok(Count::Limited(7)));
        assert_eq!(parse_count(""), Ok(Count::Unlimited));
    }

    #[test]
    fn test_default_count_is_unlimited() {
        let config = CliConfig::parse_with_shorthand(argv(&[])).unwrap();
        assert_eq!(config.count, Count::Unlimited);
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_count_flag() {
        let config = CliConfig::parse_with_shorthand(argv(&["--count", "25"])).unwrap();
        assert_eq!(config.count, Count::Limited(25));

        let config = CliConfig::parse_with_shorthand(argv(&["-c", "-5"])).unwrap();
        assert_eq!(config.count, Count::Limited(0));

        let config = CliConfig::parse_with_shorthand(argv(&["-c", "lots"])).unwrap();
        assert_eq!(config.count, Count::Unlimited);
    }

    #[test]
    fn test_shorthand_overrides_count_and_last_wins() {
        let config =
            CliConfig::parse_with_shorthand(argv(&["--count", "25", "-3", "-7"])).unwrap();
        assert_eq!(config.count, Count::Limited(7));
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_shorthand_is_removed_from_positionals() {
        let (kept, count) = extract_count_shorthand(argv(&["-10", "abc", "example.com"]));
        assert_eq!(count, Some(10));
        assert_eq!(kept, argv(&["abc", "example.com"]));
    }

    #[test]
    fn test_flag_values_are_not_shorthand() {
        let (kept, count) = extract_count_shorthand(argv(&["--count", "-5"]));
        assert_eq!(count, None);
        assert_eq!(kept, argv(&["--count", "-5"]));
    }

    #[test]
    fn test_into_parts() {
        let config = CliConfig::parse_with_shorthand(argv(&[
            "-a",
            "--domain",
            "j.mp",
            "--raw",
            "-v",
            "--key",
            "abc123",
            "--save",
            "bit.ly/x",
            "bit.ly/y",
        ]))
        .unwrap();
        let (options, args) = config.into_parts();

        assert!(options.archive);
        assert!(options.raw);
        assert!(options.verbose);
        assert!(options.save);
        assert!(!options.ask);
        assert_eq!(options.count, None);
        assert_eq!(options.domain.as_deref(), Some("j.mp"));
        assert_eq!(options.key.as_deref(), Some("abc123"));
        assert_eq!(args, vec!["bit.ly/x".to_string(), "bit.ly/y".to_string()]);
    }

    #[test]
    fn test_options_validation() {
        let mut options = Options::default();
        assert!(options.validate().is_ok());

        options.domain = Some("j.mp".to_string());
        assert!(options.validate().is_ok());

        options.domain = Some("https://j.mp/".to_string());
        assert!(options.validate().is_err());
    }
}
