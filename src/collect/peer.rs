use serde::Serialize;
use serde_json::Value;

use crate::ext::fallback_ext::{NonEmptyExt, OrNotAvailableExt};
use crate::render::byte_units::format_peer_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerStatus {
    Online,
    Offline,
}

impl PeerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerStatus::Online => "online",
            PeerStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    Direct,
    Relayed,
}

impl Connection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connection::Direct => "direct",
            Connection::Relayed => "relayed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerRecord {
    pub ip: String,
    pub hostname: String,
    pub status: PeerStatus,
    pub relay: String,
    pub connection: Connection,
    pub rx_bytes: String,
    pub tx_bytes: String,
}

impl PeerRecord {
    /// Builds a row from one value of the `Peer` map, tolerating missing or
    /// oddly typed fields.
    pub fn from_value(peer: &Value) -> Self {
        let ip = peer
            .get("TailscaleIPs")
            .and_then(Value::as_array)
            .and_then(|ips| ips.first())
            .and_then(Value::as_str)
            .or_na();
        let hostname = peer.get("HostName").and_then(Value::as_str).or_na();
        let status = match peer.get("Online").and_then(Value::as_bool) {
            Some(true) => PeerStatus::Online,
            _ => PeerStatus::Offline,
        };
        let relay = peer.get("Relay").and_then(Value::as_str).or_na();
        let connection = match peer.get("CurAddr").and_then(Value::as_str).non_empty() {
            Some(_) => Connection::Direct,
            None => Connection::Relayed,
        };

        PeerRecord {
            ip,
            hostname,
            status,
            relay,
            connection,
            rx_bytes: format_peer_bytes(peer.get("RxBytes").and_then(Value::as_u64)),
            tx_bytes: format_peer_bytes(peer.get("TxBytes").and_then(Value::as_u64)),
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        [
            self.ip.as_str(),
            self.hostname.as_str(),
            self.status.as_str(),
            self.relay.as_str(),
            self.connection.as_str(),
            self.rx_bytes.as_str(),
            self.tx_bytes.as_str(),
        ]
    }
}

/// Parses `tailscale status --json` into peer rows, in the order the `Peer`
/// map lists them. A missing `Peer` map means no peers.
pub fn parse_peers(stdout: &str) -> serde_json::Result<Vec<PeerRecord>> {
    let status: Value = serde_json::from_str(stdout)?;
    let peers = status
        .get("Peer")
        .and_then(Value::as_object)
        .map(|peers| peers.values().map(PeerRecord::from_value).collect())
        .unwrap_or_default();
    Ok(peers)
}
