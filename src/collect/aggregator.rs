use tracing::{debug, error};

use crate::collect::ip_interface::{parse_interfaces, IpInterface};
use crate::collect::peer::parse_peers;
use crate::collect::snapshot::{PeerRows, Placeholder, Snapshot};
use crate::config::panel_config::{CommandSpec, Evaluate, InterfaceFilter, PanelConfig};
use crate::exec::{CommandRunner, ExecFailure, ExecOutput};
use crate::notify::{Notification, Notifier};

pub const PERMISSION_MESSAGE: &str = "Permission denied: Ensure the user running the status panel has access to run \"tailscale status --json\". Try configuring sudo or checking Tailscale service permissions.";
pub const NOT_RUNNING_MESSAGE: &str =
    "Tailscale service is not running. Please start Tailscale and try again.";
pub const EMPTY_STATUS_MESSAGE: &str =
    "Tailscale status command returned empty output. Ensure Tailscale is running.";

/// Turns a failed status command into the banner shown to the user. The
/// structured failure is checked first; the text is the fallback for
/// executables that only explain themselves on stderr.
pub fn status_failure_message(output: &ExecOutput) -> String {
    let message = if output.message.is_empty() {
        "Command failed"
    } else {
        output.message.as_str()
    };

    if output.failure == Some(ExecFailure::PermissionDenied) || message.contains("Permission") {
        PERMISSION_MESSAGE.to_string()
    } else if message.contains("not running") || message.contains("stopped") {
        NOT_RUNNING_MESSAGE.to_string()
    } else {
        format!("Unable to get Tailscale status: {message}.")
    }
}

pub struct Aggregator<R> {
    runner: R,
    interface_command: CommandSpec,
    status_command: CommandSpec,
    filters: Vec<InterfaceFilter>,
}

impl<R: CommandRunner> Aggregator<R> {
    pub fn new(config: &PanelConfig, runner: R) -> Self {
        Aggregator {
            runner,
            interface_command: config.interface_command.clone(),
            status_command: config.status_command.clone(),
            filters: config.interfaces.clone(),
        }
    }

    /// Gathers one snapshot. Every failure ends up as a notification plus a
    /// placeholder, so this always returns something renderable.
    pub fn aggregate(&self, notifier: &mut dyn Notifier) -> Snapshot {
        let interfaces: Vec<IpInterface> = self
            .collect_interfaces(notifier)
            .into_iter()
            .filter(|iface| self.filters.iter().any(|filter| filter.evaluate(iface)))
            .collect();
        debug!(count = interfaces.len(), "Matched Tailscale interfaces");

        // Without an interface there is nothing to ask the daemon about.
        let status_rows = if interfaces.is_empty() {
            PeerRows::Placeholder(Placeholder::NoPeers)
        } else {
            self.collect_peer_rows(notifier)
        };

        Snapshot::new(interfaces, status_rows)
    }

    fn collect_interfaces(&self, notifier: &mut dyn Notifier) -> Vec<IpInterface> {
        let output = self.runner.exec(&self.interface_command);
        if !output.is_success() || output.is_blank() {
            let reason = if output.message.is_empty() {
                "Unknown error"
            } else {
                output.message.as_str()
            };
            notifier.notify(Notification::error(format!(
                "Unable to get interface info: {reason}."
            )));
            return Vec::new();
        }

        match parse_interfaces(&output.stdout) {
            Ok(interfaces) => interfaces
                .into_iter()
                .filter(|iface| !iface.ifname.is_empty())
                .collect(),
            Err(err) => {
                error!(?err, "Failed to parse interface info");
                notifier.notify(Notification::error(format!(
                    "Error parsing interface info: {err}."
                )));
                Vec::new()
            }
        }
    }

    fn collect_peer_rows(&self, notifier: &mut dyn Notifier) -> PeerRows {
        let output = self.runner.exec(&self.status_command);
        if !output.is_success() {
            notifier.notify(Notification::error(status_failure_message(&output)));
            return PeerRows::Placeholder(Placeholder::ErrorRetrieving);
        }

        if output.is_blank() {
            notifier.notify(Notification::warning(EMPTY_STATUS_MESSAGE));
            return PeerRows::Placeholder(Placeholder::NoStatusOutput);
        }

        match parse_peers(&output.stdout) {
            Ok(peers) => PeerRows::from_peers(peers),
            Err(err) => {
                error!(?err, "Failed to parse Tailscale status");
                notifier.notify(Notification::error(format!(
                    "Error parsing Tailscale status JSON: {err}."
                )));
                PeerRows::Placeholder(Placeholder::ErrorParsing)
            }
        }
    }
}
