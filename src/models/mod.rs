//! Core data model for audit results
//!
//! Wire names follow the audit engine's JSON schema (camelCase), matching the
//! shape persisted by `scan` and consumed again by `fix --report`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod display;

/// Severity of a single finding, from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl FromStr for Severity {
    type Err = String;

    /// Parse the engine's severity string. Unknown values are an error, not
    /// a guess; the normalizer maps them to `InvalidSeverity`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Critical" => Ok(Severity::Critical),
            "High" => Ok(Severity::High),
            "Medium" => Ok(Severity::Medium),
            "Low" => Ok(Severity::Low),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// A single vulnerability reported by the audit engine.
///
/// Immutable once produced by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Process-unique finding ID assigned by the normalizer
    pub id: String,

    /// Short vulnerability name
    pub name: String,

    /// Severity level
    pub severity: Severity,

    /// First affected line (1-indexed)
    pub line_start: u32,

    /// Last affected line (always >= line_start)
    pub line_end: u32,

    /// What the vulnerability is
    pub description: String,

    /// Why it matters
    pub risk: String,

    /// How an attacker would exploit it
    pub attack_scenario: String,

    /// Suggested remediation
    pub fix: String,

    /// Engine confidence, 0-100
    pub confidence: u8,

    /// Common Weakness Enumeration ID, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<String>,

    /// OWASP Top 10 category, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owasp_category: Option<String>,
}

/// Complete result of one scan.
///
/// `code` echoes the scanned input verbatim so a saved report is enough to
/// drive a later `fix` call without re-reading the original file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Process-unique audit ID assigned by the normalizer
    pub id: String,

    /// Name of the scanned file
    pub file_name: String,

    /// The scanned source, verbatim
    pub code: String,

    /// Overall security score, 0 (critical flaws) to 100 (clean)
    pub score: u8,

    /// Executive summary of the audit
    pub summary: String,

    /// When the result was produced
    pub timestamp: DateTime<Utc>,

    /// Findings in the order the engine reported them
    pub findings: Vec<Finding>,
}

impl AuditResult {
    /// Count of findings at the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}

/// Read-only snapshot of orchestrator state, for `stats()`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    /// Live entries in the result cache
    pub cache_size: usize,

    /// Clients currently tracked by the rate limiter
    pub rate_limit_entries: usize,

    /// Effective configuration
    pub config: LimitsSnapshot,
}

/// Effective pipeline limits, reported alongside stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsSnapshot {
    pub max_code_size: usize,
    pub rate_limit_per_minute: usize,
    pub cache_ttl_ms: u64,
    pub timeout_ms: u64,
}
