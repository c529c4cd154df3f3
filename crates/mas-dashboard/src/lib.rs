pub mod document;
pub mod markup;
pub mod poller;
pub mod render;
pub mod source;
pub mod time_format;

pub use document::{Document, Item, RegionContent, RegionMut, RegionSink};
pub use markup::{MarkupContract, RegionIds};
pub use poller::{PollerHandle, SharedDocument, StatusPoller, REFRESH_INTERVAL};
pub use render::{render_snapshot, NO_ALERTS, PLACEHOLDER};
pub use source::{FetchError, HttpStatusSource, StatusSource};
pub use time_format::TimestampFormat;
