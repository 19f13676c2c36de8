#![deny(clippy::all)]

mod clipboard;
mod config;
#[cfg(not(target_os = "macos"))]
mod console;
#[cfg(target_os = "macos")]
mod counter_window;
mod document;
mod error;
mod metrics;
mod poller;
mod view;

use std::path::PathBuf;
use tracing::{error, info};

use error::AppError;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the console report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(e) = run().await {
        error!("Initialization failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = config::load()?;
    info!(
        "Clipboard poll interval {:?}, focus policy {:?}",
        config.clipboard.poll_interval(),
        config.clipboard.focus_policy
    );

    // Optional text file to load at launch
    let launch_file = std::env::args_os().nth(1).map(PathBuf::from);

    #[cfg(target_os = "macos")]
    {
        counter_window::CounterWindow::run(&config, launch_file)
    }

    #[cfg(not(target_os = "macos"))]
    {
        console::run(&config, launch_file).await
    }
}
