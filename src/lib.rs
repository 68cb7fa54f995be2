pub mod browse;
pub mod catalog;
mod cli;
pub mod clipboard;
mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod render;
pub mod resource;
pub mod session;
pub mod state;
pub mod storage;
pub mod studio;
pub use error::{AppError, AppResult};

use clap::Parser;

/// Entrypoint used by the `memedrop` binary.
pub fn run() -> AppResult<()> {
    logging::init();
    let cli = cli::Cli::parse();
    let config = config::load_app_config();
    tracing::debug!(?config, "starting memedrop");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    runtime.block_on(cli::execute(cli, config))
}
