//! Console front end
//!
//! Runs the counter view without a window: the poll timer is a tokio
//! interval on the current thread, and the metrics are printed to stdout
//! each time they change. Ctrl+C exits.

use std::io::{self, Write};
use std::path::PathBuf;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::clipboard::{ClipboardAccess, SystemClipboard};
use crate::config::Config;
use crate::error::AppError;
use crate::metrics::TextMetrics;
use crate::view::{CounterView, ViewEffect, ViewEvent, ViewSettings};

struct ConsoleFrontend<C> {
    view: CounterView,
    clipboard: C,
    ticker: Option<Interval>,
}

impl<C: ClipboardAccess> ConsoleFrontend<C> {
    fn new(settings: ViewSettings, clipboard: C) -> Self {
        Self {
            view: CounterView::new(settings),
            clipboard,
            ticker: None,
        }
    }

    fn initialize(&mut self) {
        let effects = self.view.initialize(&mut self.clipboard);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<ViewEffect>) {
        for effect in effects {
            match effect {
                ViewEffect::StartPolling(period) => {
                    // The arming poll already ran, so the first tick waits a full period
                    let mut ticker = time::interval_at(time::Instant::now() + period, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    self.ticker = Some(ticker);
                }
                ViewEffect::StopPolling => self.ticker = None,
                ViewEffect::MetricsChanged(metrics) => {
                    let mut stdout = io::stdout().lock();
                    if let Err(e) = print_report(&mut stdout, &metrics, self.view.show_details()) {
                        warn!("Failed to write metrics: {}", e);
                    }
                }
                ViewEffect::Notice(message) => info!("{}", message),
                ViewEffect::ReplaceText(_)
                | ViewEffect::SetAutoCapture(_)
                | ViewEffect::DetailsVisible(_) => {}
            }
        }
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let effects = self.view.handle(event, &mut self.clipboard);
        self.apply(effects);
    }
}

/// Wait for the next tick, or forever when polling is stopped
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Run until Ctrl+C
pub(crate) async fn run(config: &Config, launch_file: Option<PathBuf>) -> Result<(), AppError> {
    info!("Starting {} in console mode", config.window.title);

    let mut frontend = ConsoleFrontend::new(ViewSettings::from(config), SystemClipboard::new());

    if let Some(path) = launch_file {
        frontend.dispatch(ViewEvent::FileOpened(path));
    }
    frontend.initialize();

    loop {
        tokio::select! {
            _ = next_tick(&mut frontend.ticker) => frontend.dispatch(ViewEvent::PollTick),
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Interrupted, exiting");
                break;
            }
        }
    }

    Ok(())
}

/// Write one block of metric lines followed by a blank line
fn print_report<W: Write>(
    out: &mut W,
    metrics: &TextMetrics,
    show_details: bool,
) -> io::Result<()> {
    for (kind, value) in metrics.rows(show_details) {
        writeln!(out, "{}: {}", kind, value)?;
    }
    writeln!(out)?;
    out.flush()
}
