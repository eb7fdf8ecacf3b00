use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collect::ip_interface::IpInterface;

pub trait Evaluate<T> where T: ?Sized {
    fn evaluate(&self, value: &T) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Predicate {
    Contains(String),
    StartsWith(String),
    Equal(String),
    /// The prefix followed by one or more ASCII digits, and nothing else.
    PrefixDigits(String),
}

impl Evaluate<str> for Predicate {
    fn evaluate(&self, value: &str) -> bool {
        match self {
            Predicate::Contains(pattern) => value.contains(pattern.as_str()),
            Predicate::StartsWith(pattern) => value.starts_with(pattern.as_str()),
            Predicate::Equal(pattern) => value == pattern,
            Predicate::PrefixDigits(prefix) => value
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum InterfaceFilter {
    Name(Predicate),
}

impl Evaluate<IpInterface> for InterfaceFilter {
    fn evaluate(&self, value: &IpInterface) -> bool {
        match self {
            InterfaceFilter::Name(predicate) => predicate.evaluate(&value.ifname),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        CommandSpec {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub command_timeout: Duration,
    pub output: Option<PathBuf>,
    pub interface_command: CommandSpec,
    pub status_command: CommandSpec,
    pub interfaces: Vec<InterfaceFilter>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            poll_interval: super::default_poll_interval(),
            command_timeout: super::default_command_timeout(),
            output: None,
            interface_command: CommandSpec::new("/sbin/ip", &["-s", "-j", "ad"]),
            status_command: CommandSpec::new("tailscale", &["status", "--json"]),
            interfaces: vec![InterfaceFilter::Name(Predicate::PrefixDigits(
                "tailscale".to_string(),
            ))],
        }
    }
}
