//! Tahfeez academy terminal front-end.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod console_config;
mod forms;
mod render;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tahfeez_application::{AdminStore, ApiGateway, ApiTransport, SessionStorage, WebsiteStore};
use tahfeez_core::AppResult;
use tahfeez_infrastructure::{FileSessionStorage, HttpApiClient};
use tracing::{debug, error};

use crate::cli::Cli;
use crate::commands::Console;
use crate::console_config::{ConsoleConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let mut console = match build_console().await {
        Ok(console) => console,
        Err(error) => {
            error!(error = %error, "failed to start tahfeez console");
            return ExitCode::FAILURE;
        }
    };

    match console.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(error = %error, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn build_console() -> AppResult<Console> {
    let config = ConsoleConfig::load()?;
    let storage: Arc<dyn SessionStorage> =
        Arc::new(FileSessionStorage::new(config.session_file.clone()));
    let transport: Arc<dyn ApiTransport> = Arc::new(HttpApiClient::new(
        config.api_base_url.as_str(),
        config.http_timeout,
    )?);

    let mut website = WebsiteStore::new(
        ApiGateway::new(transport.clone(), config.locale.unwrap_or_default()),
        storage.clone(),
    );
    let locale = match config.locale {
        Some(locale) => locale,
        None => website.restore_locale().await,
    };

    let mut admin = AdminStore::new(ApiGateway::new(transport, locale), storage);
    admin.restore_session().await;

    debug!(
        api_base_url = %config.api_base_url,
        locale = %locale,
        session_file = %config.session_file.display(),
        signed_in = admin.session().is_some(),
        "tahfeez console configured"
    );

    Ok(Console::new(admin, website))
}
