mod cli;
mod collect;
mod config;
mod exec;
mod ext;
mod init;
mod notify;
mod poll;
mod render;

use clap::Parser;
use tracing::info;

use crate::cli::CmdArgs;
use crate::collect::aggregator::Aggregator;
use crate::config::load_config;
use crate::exec::runner::SystemRunner;
use crate::init::init_tracing;
use crate::poll::sink::OutputSink;
use crate::poll::{Panel, Poller};

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args = CmdArgs::parse();
    let config = load_config(&args.config)?;

    let sink = OutputSink::from_path(args.output.or_else(|| config.output.clone()));
    let runner = SystemRunner::new(config.command_timeout);
    let panel = Panel::new(Aggregator::new(&config, runner), sink, args.format);

    if args.once {
        return panel.refresh();
    }

    info!(
        interval = %humantime::format_duration(config.poll_interval),
        timeout = %humantime::format_duration(config.command_timeout),
        "Starting status panel"
    );
    Poller::new(config.poll_interval).run(None, |count| panel.tick(count));

    Ok(())
}
