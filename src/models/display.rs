//! Display models for CLI output

use serde::Serialize;
use tabled::Tabled;

use super::{AuditResult, Finding};

/// Truncate a string to `max` characters, appending an ellipsis when cut.
pub fn truncate_string(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Finding display model for the report table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FindingDisplay {
    /// Finding ID
    #[tabled(rename = "ID")]
    pub id: String,

    /// Severity level
    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    /// Vulnerability name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Affected line range
    #[tabled(rename = "LINES")]
    pub lines: String,

    /// Engine confidence
    #[tabled(rename = "CONF")]
    pub confidence: String,

    /// CWE identifier
    #[tabled(rename = "CWE")]
    pub cwe: String,
}

impl From<&Finding> for FindingDisplay {
    fn from(f: &Finding) -> Self {
        Self {
            id: f.id.clone(),
            severity: f.severity.to_string(),
            name: truncate_string(&f.name, 40),
            lines: if f.line_start == f.line_end {
                f.line_start.to_string()
            } else {
                format!("{}-{}", f.line_start, f.line_end)
            },
            confidence: format!("{}%", f.confidence),
            cwe: f.cwe_id.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// One-line audit summary row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SummaryDisplay {
    #[tabled(rename = "FILE")]
    pub file_name: String,

    #[tabled(rename = "SCORE")]
    pub score: String,

    #[tabled(rename = "FINDINGS")]
    pub findings: String,

    #[tabled(rename = "SCANNED")]
    pub timestamp: String,
}

impl From<&AuditResult> for SummaryDisplay {
    fn from(r: &AuditResult) -> Self {
        Self {
            file_name: r.file_name.clone(),
            score: format!("{}/100", r.score),
            findings: r.findings.len().to_string(),
            timestamp: r.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}
