pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::BitlyClient;
pub use crate::config::{rc_file::RcFile, CliConfig, Options};
pub use crate::core::{engine::BitlyEngine, history::HistoryFetcher};
pub use crate::utils::error::{BitlyError, Result};
pub use crate::utils::output::Printer;
