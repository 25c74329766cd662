//! Sync Layer
//!
//! Seeds the local store from the external source when it is empty or stale.

mod populate;
mod report;
mod service;


pub use populate::{populate, populate_page};
pub use report::{BootstrapReport, PopulateFailure, PopulateReport, SyncOutcome, SyncReport};
pub use service::{SyncPolicy, SyncService};
