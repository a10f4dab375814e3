use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitlyError {
    #[error("Invalid access token: {message}")]
    InvalidToken { message: String },

    #[error("Bitly service returned: {status}")]
    Service { status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not write {path}: {source}")]
    ConfigWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl BitlyError {
    /// 服務端回應的 HTTP 狀態碼
    pub fn status(&self) -> Option<u16> {
        match self {
            BitlyError::Service { status } => Some(*status),
            BitlyError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            BitlyError::InvalidToken { message } => message.clone(),
            BitlyError::Service { status } => format!("Bitly service returned: {}", status),
            BitlyError::Http(e) => match e.status() {
                Some(status) => format!("Bitly service returned: {}", status.as_u16()),
                None => format!("Could not reach Bitly: {}", e),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BitlyError>;
