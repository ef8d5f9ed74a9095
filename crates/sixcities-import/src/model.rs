use serde::{Deserialize, Serialize};

/// Summary of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Data rows read, blank lines excluded.
    pub rows_read: u64,
    pub rows_valid: u64,
    pub rows_invalid: u64,
    pub duration_ms: u64,
    pub cancelled: bool,
}
