//! Headless skirmish runner.
//!
//! Loads a skirmish from the content directory, spawns it and runs the
//! creature model for a fixed number of frames, logging what every creature
//! decided. Set `RUST_LOG=debug` to also see per-tick perception detail.
mod config;
mod setup;

use anyhow::Result;
use config::ArenaConfig;
use runtime::FrameReport;
use tracing::{debug, info};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        skirmish = %config.skirmish,
        frames = config.frames,
        delta = config.delta,
        "starting arena"
    );

    let mut runtime = setup::build_runtime(&config)?;
    let mut deaths = 0usize;
    for _ in 0..config.frames {
        let report = runtime.step(config.delta)?;
        log_frame(&report);
        deaths += report.deaths.len();
    }

    let standing = runtime.roster().iter().filter(|a| a.is_alive()).count();
    info!(
        frames = runtime.time().frame,
        elapsed = runtime.time().now,
        standing,
        deaths,
        "arena finished"
    );
    Ok(())
}

fn log_frame(report: &FrameReport) {
    let frame = report.time.frame;
    for tick in &report.ticks {
        if let Some(target) = tick.perception.acquired {
            info!(frame, agent = %tick.agent, %target, "target acquired");
        }
        if !tick.alerted.is_empty() {
            info!(frame, agent = %tick.agent, allies = tick.alerted.len(), "allies alerted");
        }
        if tick.rejected > 0 {
            info!(frame, agent = %tick.agent, rejected = tick.rejected, "actions rejected");
        }
        for action in &tick.actions {
            debug!(frame, agent = %tick.agent, ?action, "action");
        }
    }
    for (agent, step) in report.steps() {
        info!(frame, %agent, %step, "decision");
    }
    for id in &report.deaths {
        info!(frame, agent = %id, "died");
    }
}
