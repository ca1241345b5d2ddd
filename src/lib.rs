pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::filter::{FilterState, SortOrder};
use anyhow::Result;
use tracing::{debug, info};

/// Commands the application can run, decoupled from the argument parser.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Summary(FilterState),
    Categories {
        search: Option<String>,
        order: SortOrder,
        pick: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Dashboard client starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::sheets_api::SheetsApiProvider::new(&config.backend.base_url);

    match command {
        AppCommand::Summary(filters) => {
            cli::summary::run(&provider, &filters, &config.currency).await
        }
        AppCommand::Categories {
            search,
            order,
            pick,
        } => {
            cli::categories::run(&provider, search.as_deref(), order, pick, &config.currency).await
        }
    }
}
