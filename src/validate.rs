//! Input validation for the audit pipeline
//!
//! Rejects malformed requests before any rate-limit slot, cache entry, or
//! network call is spent on them.

use log::warn;

use crate::error::AuditError;

/// Syntactic markers worth flagging in submitted code. Matching is an
/// advisory audit-trail signal only; submissions are never blocked on it
/// (we are analyzing security, after all).
const SUSPICIOUS_MARKERS: [&str; 4] = [
    "eval(",
    "document.write(",
    "innerhtml",
    "dangerouslysetinnerhtml",
];

/// Validate a scan or fix request.
///
/// Oversized payloads are a hard ceiling: they must never reach the remote
/// gateway, so the size check happens here and nowhere else.
pub fn validate(code: &str, file_name: &str, max_code_size: usize) -> Result<(), AuditError> {
    if code.trim().is_empty() {
        return Err(AuditError::EmptyCode);
    }

    if code.len() > max_code_size {
        return Err(AuditError::CodeTooLarge {
            size: code.len(),
            limit: max_code_size,
        });
    }

    if file_name.trim().is_empty() {
        return Err(AuditError::EmptyFileName);
    }

    let lowered = code.to_lowercase();
    if SUSPICIOUS_MARKERS.iter().any(|m| lowered.contains(m)) {
        warn!("Suspicious content detected in code submission for {file_name}");
    }

    Ok(())
}
