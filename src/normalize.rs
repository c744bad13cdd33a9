//! Response normalization
//!
//! The oracle's output is untrusted for shape: it is validated and reshaped
//! into the canonical result types here, never consumed blindly. Contract
//! violations surface as engine errors (`MalformedResponse`, `InvalidScore`,
//! `InvalidSeverity`), distinct from transport failures, because the
//! remediation differs: report a bug vs. wait and retry.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::Deserialize;

use crate::error::AuditError;
use crate::models::{AuditResult, Finding, Severity};

/// Raw scan response as the engine emits it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAudit {
    score: serde_json::Number,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    vulnerabilities: Vec<RawFinding>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFinding {
    name: String,
    severity: String,
    line_start: u32,
    line_end: u32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    risk: String,
    #[serde(default)]
    attack_scenario: String,
    #[serde(default)]
    fix: String,
    confidence: i64,
    #[serde(default)]
    cwe_id: Option<String>,
    #[serde(default)]
    owasp_category: Option<String>,
}

/// Validates oracle output and assigns result/finding identifiers.
///
/// IDs only need to be unique within one process lifetime, so a plain
/// counter is enough.
pub struct Normalizer {
    ids: AtomicU64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            ids: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.ids.fetch_add(1, Ordering::Relaxed)
    }

    /// Reshape a raw scan response into an [`AuditResult`].
    ///
    /// `code` and `file_name` are echoed into the result so a stored report
    /// can drive a later fix call.
    pub fn normalize_scan(
        &self,
        raw: &str,
        code: &str,
        file_name: &str,
    ) -> Result<AuditResult, AuditError> {
        let audit: RawAudit = serde_json::from_str(raw)
            .map_err(|e| AuditError::MalformedResponse(e.to_string()))?;

        let score = match audit.score.as_i64() {
            Some(s) if (0..=100).contains(&s) => s as u8,
            _ => return Err(AuditError::InvalidScore(audit.score)),
        };

        let audit_id = self.next_id();
        let findings = audit
            .vulnerabilities
            .into_iter()
            .enumerate()
            .map(|(i, raw)| self.normalize_finding(raw, audit_id, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AuditResult {
            id: format!("audit-{audit_id}"),
            file_name: file_name.to_string(),
            code: code.to_string(),
            score,
            summary: audit.summary,
            timestamp: Utc::now(),
            findings,
        })
    }

    fn normalize_finding(
        &self,
        raw: RawFinding,
        audit_id: u64,
        index: usize,
    ) -> Result<Finding, AuditError> {
        let severity: Severity = raw
            .severity
            .parse()
            .map_err(AuditError::InvalidSeverity)?;

        let line_start = raw.line_start.max(1);
        // The engine occasionally inverts ranges; clamp rather than reject
        let line_end = raw.line_end.max(line_start);

        Ok(Finding {
            id: format!("vuln-{audit_id}-{index}"),
            name: raw.name,
            severity,
            line_start,
            line_end,
            description: raw.description,
            risk: raw.risk,
            attack_scenario: raw.attack_scenario,
            fix: raw.fix,
            confidence: raw.confidence.clamp(0, 100) as u8,
            cwe_id: raw.cwe_id,
            owasp_category: raw.owasp_category,
        })
    }

    /// Clean up a raw fix response into usable source text.
    ///
    /// Strips a single markdown fence if the engine wrapped its answer in
    /// one, then guards against blank and truncated remediations.
    pub fn normalize_fix(&self, raw: &str, original_code: &str) -> Result<String, AuditError> {
        let mut fixed = raw;

        if raw.contains("```") {
            let blocks: Vec<&str> = raw.split("```").collect();
            if blocks.len() >= 3 {
                fixed = blocks[1];
                // Drop a leading language tag line like "javascript"
                if let Some((first_line, rest)) = fixed.split_once('\n') {
                    let tag = first_line.trim();
                    if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                        fixed = rest;
                    }
                }
            }
        }

        let cleaned = fixed.trim();
        if cleaned.is_empty() {
            return Err(AuditError::EmptyFix);
        }

        // A fix much shorter than the input is almost certainly truncated
        if cleaned.len() * 2 < original_code.len() {
            return Err(AuditError::IncompleteFix {
                got: cleaned.len(),
                original: original_code.len(),
            });
        }

        Ok(cleaned.to_string())
    }
}
