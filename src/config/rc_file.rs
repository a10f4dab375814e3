use crate::domain::ports::TokenStore;
use crate::utils::error::{BitlyError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".bitlyrc";

/// 可覆蓋設定檔 token 的環境變數，依序檢查
pub const KEY_ENV_VARS: &[&str] = &["bitly_key", "BITLY_KEY"];

#[derive(Debug, Default, Deserialize)]
struct RcContents {
    key: Option<String>,
}

/// `~/.bitlyrc`，內容為 `key = <token>`
#[derive(Debug, Clone)]
pub struct RcFile {
    path: PathBuf,
}

impl RcFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(RC_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 從檔案載入 token；檔案不存在時回傳 `Ok(None)`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::parse_key(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BitlyError::Io(e)),
        }
    }

    /// 先當作 TOML 解析，失敗時退回 `key = value` 的寬鬆格式
    pub fn parse_key(content: &str) -> Option<String> {
        if let Ok(parsed) = toml::from_str::<RcContents>(content) {
            if let Some(key) = parsed.key {
                return Some(key);
            }
        }

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
            .filter_map(|line| line.split_once('='))
            .find(|(name, _)| name.trim() == "key")
            .map(|(_, value)| value.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|value| !value.is_empty())
    }

    /// 環境變數中的 token
    pub fn key_from_env() -> Option<String> {
        KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

impl TokenStore for RcFile {
    fn load_key(&self) -> Option<String> {
        match Self::from_file(&self.path) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save_key(&self, key: &str) -> Result<String> {
        let path = self.path.display().to_string();
        std::fs::write(&self.path, format!("key = {}", key)).map_err(|source| {
            BitlyError::ConfigWriteError {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!("Saved access token to {}", path);
        Ok(path)
    }
}
