use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error};

use crate::cli::OutputFormat;
use crate::collect::aggregator::Aggregator;
use crate::collect::snapshot::Snapshot;
use crate::exec::CommandRunner;
use crate::notify::{BannerNotifier, Notification};
use crate::poll::sink::OutputSink;
use crate::render::renderer::render_page;

pub mod sink;

/// Calls the tick on a fixed cadence. A tick that overruns the interval
/// delays the next one; ticks never overlap.
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Poller { interval }
    }

    /// Runs `ticks` times, or forever when `None`.
    pub fn run(&self, ticks: Option<u64>, mut tick: impl FnMut(u64)) {
        let mut count = 0;
        while ticks.map_or(true, |ticks| count < ticks) {
            let started = Instant::now();
            tick(count);
            count += 1;

            if ticks.is_some_and(|ticks| count >= ticks) {
                break;
            }
            std::thread::sleep(self.interval.saturating_sub(started.elapsed()));
        }
    }
}

#[derive(Serialize)]
struct PanelReport<'a> {
    snapshot: &'a Snapshot,
    notifications: &'a [Notification],
}

pub fn render_output(
    format: OutputFormat,
    snapshot: &Snapshot,
    banners: &[Notification],
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Html => Ok(render_page(snapshot, banners).to_html()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&PanelReport {
            snapshot,
            notifications: banners,
        })?),
    }
}

/// One poll cycle: aggregate, render, replace the displayed output.
pub struct Panel<R> {
    aggregator: Aggregator<R>,
    sink: OutputSink,
    format: OutputFormat,
}

impl<R: CommandRunner> Panel<R> {
    pub fn new(aggregator: Aggregator<R>, sink: OutputSink, format: OutputFormat) -> Self {
        Panel {
            aggregator,
            sink,
            format,
        }
    }

    pub fn refresh(&self) -> anyhow::Result<()> {
        let mut notifier = BannerNotifier::default();
        let snapshot = self.aggregator.aggregate(&mut notifier);
        let output = render_output(self.format, &snapshot, notifier.banners())?;
        self.sink.write(&output)
    }

    pub fn tick(&self, count: u64) {
        debug!(tick = count, "Refreshing panel");
        if let Err(err) = self.refresh() {
            error!(?err, "Failed to refresh panel");
        }
    }
}
