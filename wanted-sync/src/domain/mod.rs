//! Domain Layer
//!
//! Records, store snapshots and the staleness rule. No I/O happens here.

mod entity;
mod remote;
mod snapshot;
mod sync_state;
mod wanted;

pub use entity::{DomainError, DomainResult, Entity};
pub use remote::{RemoteItem, RemotePage};
pub use snapshot::{is_marker_id, ShapeError, StoreSnapshot};
pub use sync_state::{is_stale, needs_sync, parse_stored_date, SyncState, SYNC_MARKER_ID};
pub use wanted::{
    editable_field, filter_records, Measure, WantedFields, WantedImage, WantedRecord, DETAIL_FIELDS, NOT_AVAILABLE,
};
