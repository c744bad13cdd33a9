//! JSON output formatting
//!
//! Reports are emitted as plain pretty-printed `AuditResult` JSON, with no
//! envelope, so a saved report deserializes straight back for `fix --report`.

use serde::Serialize;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}
