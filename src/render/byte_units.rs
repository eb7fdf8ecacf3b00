const STEP: f64 = 1024.0;
const UNITS: [&str; 7] = ["", "K", "M", "G", "T", "P", "E"];

/// Peer counters that are absent or zero are shown as this, not formatted.
pub const ZERO_PEER_BYTES: &str = "0 MB";

/// Scales a byte count by 1024 while it stays above 1024 and labels the
/// result, e.g. `2097152` -> `"2.00 MB"`. Unscaled values keep no decimals.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while unit < UNITS.len() - 1 && value > STEP {
        value /= STEP;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}B", UNITS[unit])
    }
}

/// Counter formatting for peers: zero or missing is the fixed default.
pub fn format_peer_bytes(bytes: Option<u64>) -> String {
    match bytes {
        Some(bytes) if bytes > 0 => format_bytes(bytes),
        _ => ZERO_PEER_BYTES.to_string(),
    }
}
