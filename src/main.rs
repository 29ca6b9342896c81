//! src/main.rs
//!
//! Entrypoint: parse options, set up error reports and logging, then delegate
//! to `app::run()`.

mod app;
mod cli;
mod logging;
mod panels;
mod ui;

use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    logging::init(&cli.log_file)?;
    tracing::info!("ringscope v{} starting", env!("CARGO_PKG_VERSION"));
    app::run(cli)
}
