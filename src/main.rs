use bitly_cli::adapters::http::{API_URL_ENV, DEFAULT_API_URL};
use bitly_cli::core::credentials::{prompt_for_token, resolve_access_token};
use bitly_cli::core::resolver::archive_without_target;
use bitly_cli::domain::ports::TokenStore;
use bitly_cli::utils::{logger, validation::Validate};
use bitly_cli::{BitlyClient, BitlyEngine, BitlyError, CliConfig, Options, Printer, RcFile};
use colored::Colorize;
use std::process::ExitCode;

async fn run(options: Options, args: Vec<String>) -> anyhow::Result<()> {
    // --archive 沒有參數：直接結束，不詢問 token
    if archive_without_target(&options, &args) {
        return Ok(());
    }

    let store = RcFile::new(
        options
            .config_path
            .clone()
            .unwrap_or_else(RcFile::default_path),
    );
    let stored = RcFile::key_from_env().or_else(|| store.load_key());

    let mut printer = Printer::new(
        std::io::stdout(),
        options.raw,
        options.verbose,
        options.domain.clone(),
    );
    let access_token = resolve_access_token(&options, stored, &store, prompt_for_token, &mut printer)?;

    let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    tracing::debug!("Using Bitly API at {}", api_url);
    let client = BitlyClient::with_base_url(api_url, access_token)?;

    let mut engine = BitlyEngine::new(client, options, printer);
    engine.run(&args).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match CliConfig::parse_with_shorthand(std::env::args()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    logger::init_cli_logger(config.verbose);

    let (options, args) = config.into_parts();
    tracing::debug!("Options: {:?}", options);

    if let Err(e) = options.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        println!("{}", e.user_friendly_message().red());
        return ExitCode::FAILURE;
    }

    match run(options, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<BitlyError>() {
                Some(err) => err.user_friendly_message(),
                None => e.to_string(),
            };
            tracing::error!("bitly failed: {:#}", e);
            println!("{}", message.red());
            ExitCode::FAILURE
        }
    }
}
