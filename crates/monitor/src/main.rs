//! Posture Monitor - Main Entry Point

use std::io::BufReader;
use std::time::Duration;

use alerting::{AlertDispatcher, LogOverlay, SilentAudio, Status, TerminalBell};
use anyhow::Context;
use clap::Parser;
use landmarks::{LandmarkSource, ReplaySource};
use monitor::cli::Cli;
use monitor::{init_logging, Monitor, MonitorConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let result = runtime.block_on(run(Cli::parse()));
    // A stdin read abandoned on stop may still be parked on the blocking pool
    runtime.shutdown_timeout(Duration::from_millis(250));
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging("info", cli.log_json)?;

    info!("=== Posture Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = MonitorConfig::load(cli.config.as_deref(), cli.profile.map(Into::into))
        .context("loading configuration")?;
    cli.apply_overrides(&mut config);
    let config = config.validated()?;

    let mut dispatcher = if config.audio {
        AlertDispatcher::new(TerminalBell::stdout())
    } else {
        AlertDispatcher::new(SilentAudio)
    };

    let source: Box<dyn LandmarkSource + Send> = match &cli.replay {
        Some(path) => match ReplaySource::open(path) {
            Ok(source) => Box::new(source),
            Err(e) => {
                // The status board logs the failure
                dispatcher.set_status(Status::Error(e.to_string()));
                return Err(e).context("initializing landmark source");
            }
        },
        None => {
            info!("Replaying landmarks from stdin");
            Box::new(ReplaySource::from_reader(BufReader::new(std::io::stdin())))
        }
    };

    let mut monitor = Monitor::new(config, source, dispatcher).with_overlay(LogOverlay::new());

    let handle = monitor.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.stop();
        }
    });

    let summary = monitor.run().await;
    info!(
        "Done: {} ticks, {} alerts ({:?})",
        summary.ticks, summary.alerts, summary.reason
    );

    Ok(())
}
