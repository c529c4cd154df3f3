pub mod snapshot;

pub use snapshot::{parse_timestamp, StatusSnapshot};

pub mod telemetry;
