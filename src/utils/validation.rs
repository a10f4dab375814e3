use crate::utils::error::{BitlyError, Result};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]+$").expect("token pattern is valid"));

static HOSTNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+$")
        .expect("hostname pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 快速檢查 token 外觀（只是形狀檢查，不是真正的驗證）
pub fn token_looks_realistic(token: &str) -> bool {
    TOKEN_PATTERN.is_match(token)
}

pub fn validate_token(token: &str, message: &str) -> Result<()> {
    if token_looks_realistic(token) {
        Ok(())
    } else {
        Err(BitlyError::InvalidToken {
            message: message.to_string(),
        })
    }
}

pub fn validate_hostname(field_name: &str, host: &str) -> Result<()> {
    if host.trim().is_empty() {
        return Err(BitlyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }

    if !HOSTNAME_PATTERN.is_match(host) {
        return Err(BitlyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Expected a bare hostname such as bit.ly".to_string(),
        });
    }

    Ok(())
}
