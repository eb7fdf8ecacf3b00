use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = r###"Renders the Tailscale interface and peer status panel"###)]
pub struct CmdArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "/etc/tailscale_status/panel.toml")]
    pub config: PathBuf,

    /// Render a single panel and exit.
    #[arg(long)]
    pub once: bool,

    /// Where to write the panel; overrides the config file. Stdout when unset.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Panel format: the rendered HTML page or the snapshot as JSON.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CmdArgs::parse_from(["tailscale_status"]);
        assert_eq!(args.config, PathBuf::from("/etc/tailscale_status/panel.toml"));
        assert!(!args.once);
        assert_eq!(args.output, None);
        assert_eq!(args.format, OutputFormat::Html);
    }

    #[test]
    fn test_flags() {
        let args = CmdArgs::parse_from([
            "tailscale_status",
            "-c",
            "/tmp/panel.toml",
            "--once",
            "-o",
            "/tmp/panel.json",
            "--format",
            "json",
        ]);
        assert_eq!(args.config, PathBuf::from("/tmp/panel.toml"));
        assert!(args.once);
        assert_eq!(args.output, Some(PathBuf::from("/tmp/panel.json")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_every_flag_has_help() {
        let command = <CmdArgs as clap::CommandFactory>::command();
        for arg in command.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help", arg.get_id());
        }
    }
}
