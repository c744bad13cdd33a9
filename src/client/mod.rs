//! Remote audit engine client

use async_trait::async_trait;

use crate::error::AuditError;
use crate::models::Finding;

pub mod gemini;
#[cfg(test)]
pub mod mock;

pub use gemini::GeminiClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockOracle;

/// Result type for gateway operations.
///
/// Gateway failures are always part of the audit taxonomy so the
/// orchestrator can pass them through untranslated.
pub type OracleResult<T> = std::result::Result<T, AuditError>;

/// The remote reasoning oracle behind the audit pipeline.
///
/// Both operations return the oracle's raw text: a JSON document for `scan`,
/// plain (possibly fenced) source text for `fix`. Shape validation is the
/// normalizer's job; the gateway only bounds latency and classifies
/// transport failures. One attempt per call, no internal retry.
#[async_trait]
pub trait OracleApi: Send + Sync {
    /// Request a security audit of `code`.
    async fn scan(&self, code: &str, file_name: &str) -> OracleResult<String>;

    /// Request remediated source for the given findings.
    async fn fix(&self, code: &str, file_name: &str, findings: &[Finding])
        -> OracleResult<String>;
}
