pub mod aggregator;
pub mod ip_interface;
pub mod peer;
pub mod snapshot;
