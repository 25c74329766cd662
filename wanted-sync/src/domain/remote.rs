//! External Source Records
//!
//! Shapes returned by the FBI Wanted list API. Only the fields the local
//! store keeps are decoded; everything else, including the source's own ids,
//! is dropped on the way in.

use serde::Deserialize;
use serde_json::Value;

use super::wanted::WantedFields;

/// One page of `GET {remote}?page=N`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePage {
    /// Raw items; decoded one at a time so a single bad item only fails itself
    #[serde(default)]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// An item of the external feed
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
    /// Source-side identifier, never forwarded to the local store
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(flatten)]
    pub fields: WantedFields,
}

impl RemoteItem {
    pub fn decode(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }

    /// Create payload for the local store
    pub fn into_draft(self) -> WantedFields {
        self.fields
    }
}
