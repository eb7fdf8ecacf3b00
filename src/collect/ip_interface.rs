use serde::{Deserialize, Serialize};

/// One entry of `ip -s -j address` output. Only the fields the panel shows
/// are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInterface {
    #[serde(default)]
    pub ifname: String,
    #[serde(default)]
    pub mtu: Option<u32>,
    #[serde(default)]
    pub stats64: Option<Stats64>,
    #[serde(default)]
    pub addr_info: Vec<AddrInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats64 {
    #[serde(default)]
    pub rx: Counters,
    #[serde(default)]
    pub tx: Counters,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    #[serde(default)]
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddrInfo {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub local: Option<String>,
}

impl IpInterface {
    /// First address of the given family (`inet` or `inet6`).
    pub fn first_address(&self, family: &str) -> Option<&str> {
        self.addr_info
            .iter()
            .find(|addr| addr.family == family)
            .and_then(|addr| addr.local.as_deref())
    }

    pub fn rx_bytes(&self) -> Option<u64> {
        self.stats64.as_ref().map(|stats| stats.rx.bytes)
    }

    pub fn tx_bytes(&self) -> Option<u64> {
        self.stats64.as_ref().map(|stats| stats.tx.bytes)
    }
}

pub fn parse_interfaces(stdout: &str) -> serde_json::Result<Vec<IpInterface>> {
    serde_json::from_str(stdout)
}
