use crate::config::Options;
use crate::domain::ports::TokenStore;
use crate::utils::error::{BitlyError, Result};
use crate::utils::output::Printer;
use crate::utils::validation::{token_looks_realistic, validate_token};
use colored::Colorize;
use std::io::Write;

pub const TOKEN_SETTINGS_URL: &str = "https://app.bitly.com/settings/api/";

/// 互動式詢問 access token
pub fn prompt_for_token() -> Result<String> {
    println!("Please enter your Bitly access token.");
    println!("Get an API access token here: {}", TOKEN_SETTINGS_URL.yellow());
    println!();

    let key: String = dialoguer::Input::new()
        .with_prompt("Access token")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| BitlyError::Prompt {
            message: e.to_string(),
        })?;
    println!();

    Ok(key)
}

fn save_token<S: TokenStore, W: Write>(store: &S, key: &str, printer: &mut Printer<W>) -> Result<()> {
    match store.save_key(key) {
        Ok(path) => {
            printer.notice(&format!("Access token has been saved to: {}", path.yellow()))?;
        }
        Err(e) => {
            tracing::warn!("Access token was not saved: {}", e);
            printer.error(&e.to_string())?;
        }
    }
    printer.notice("")
}

/// 決定本次使用的 token：`--ask` 或沒有可用的 token 時詢問，其次 `--key`，最後是已儲存的 token
pub fn resolve_access_token<S, W, P>(
    options: &Options,
    stored: Option<String>,
    store: &S,
    prompt: P,
    printer: &mut Printer<W>,
) -> Result<String>
where
    S: TokenStore,
    W: Write,
    P: FnOnce() -> Result<String>,
{
    let stored_usable = stored.as_deref().filter(|key| token_looks_realistic(key));

    match (&options.key, stored_usable) {
        (key, usable) if options.ask || (key.is_none() && usable.is_none()) => {
            let key = prompt()?.trim().to_string();
            validate_token(&key, "Invalid access token")?;

            // 沒有已儲存的 token 或指定 --save 時才寫檔
            if options.save || stored.is_none() {
                save_token(store, &key, printer)?;
            }
            Ok(key)
        }
        (Some(key), _) => {
            validate_token(
                key,
                "The access token you have provided does not appear to be valid",
            )?;
            if options.save {
                save_token(store, key, printer)?;
            }
            Ok(key.clone())
        }
        (None, Some(stored)) => Ok(stored.to_string()),
        (None, None) => Err(BitlyError::InvalidToken {
            message: "Invalid access token".to_string(),
        }),
    }
}
