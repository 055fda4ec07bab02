//! Wire-level message definitions for the live supplier feed.
//!
//! The feed speaks snapshots only: every payload carries the complete
//! owner-scoped record set, never an incremental patch.

use serde::Serialize;

use crate::domain::supplier::SupplierRecord;
use crate::inbound::http::suppliers::SupplierResponse;

/// Full owner-scoped snapshot pushed on connect and on every store change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMessage {
    /// Discriminator for feed clients; always `"snapshot"`.
    pub kind: &'static str,
    pub suppliers: Vec<SupplierResponse>,
}

impl SnapshotMessage {
    /// Build a snapshot payload from the freshly listed records.
    pub fn new(records: &[SupplierRecord]) -> Self {
        Self {
            kind: "snapshot",
            suppliers: records.iter().map(SupplierResponse::from).collect(),
        }
    }
}
