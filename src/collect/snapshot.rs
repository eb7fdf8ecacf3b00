use chrono::{DateTime, Local};
use serde::Serialize;

use crate::collect::ip_interface::IpInterface;
use crate::collect::peer::PeerRecord;

/// Row shown in place of the peer list when there is nothing to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoPeers,
    ErrorRetrieving,
    NoStatusOutput,
    ErrorParsing,
}

impl Placeholder {
    pub fn label(&self) -> &'static str {
        match self {
            Placeholder::NoPeers => "No peers found",
            Placeholder::ErrorRetrieving => "Error retrieving status",
            Placeholder::NoStatusOutput => "No status output",
            Placeholder::ErrorParsing => "Error parsing status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum PeerRows {
    /// Never empty; an empty list becomes `Placeholder(NoPeers)`.
    Peers(Vec<PeerRecord>),
    Placeholder(Placeholder),
}

impl PeerRows {
    pub fn from_peers(peers: Vec<PeerRecord>) -> Self {
        if peers.is_empty() {
            PeerRows::Placeholder(Placeholder::NoPeers)
        } else {
            PeerRows::Peers(peers)
        }
    }
}

/// Everything gathered in one poll tick.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub collected_at: DateTime<Local>,
    pub interfaces: Vec<IpInterface>,
    pub status_rows: PeerRows,
}

impl Snapshot {
    pub fn new(interfaces: Vec<IpInterface>, status_rows: PeerRows) -> Self {
        Snapshot {
            collected_at: Local::now(),
            interfaces,
            status_rows,
        }
    }
}
