//! Audit orchestration
//!
//! Composes validator, rate limiter, cache, gateway, and normalizer into the
//! two pipelines the application exposes:
//!
//! scan: validate -> rate check -> cache lookup -> remote call -> normalize
//!       -> cache store
//! fix:  validate -> findings non-empty -> remote call -> normalize
//!
//! Any stage failure short-circuits the rest. `skip_cache` bypasses both
//! cache stages, which matters when verifying a fix: a stale cached audit of
//! the pre-fix code would be exactly the wrong answer.

use std::time::Duration;

use log::{debug, info};

use crate::cache::{fingerprint, ResultCache};
use crate::client::OracleApi;
use crate::config::Limits;
use crate::error::AuditError;
use crate::limiter::RateLimiter;
use crate::models::{AuditResult, AuditStats, Finding};
use crate::normalize::Normalizer;
use crate::validate::validate;

/// Clients that don't identify themselves share one budget.
const DEFAULT_CLIENT_ID: &str = "default";

/// Per-request options for the scan pipeline.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Identity the rate limiter budgets against
    pub client_id: Option<String>,

    /// Bypass cache lookup and store entirely
    pub skip_cache: bool,
}

/// The orchestrator. Owns all pipeline state; constructed empty, emptied
/// again by [`Auditor::clear`]. Nothing here outlives the process.
pub struct Auditor<O: OracleApi> {
    oracle: O,
    limiter: RateLimiter,
    cache: ResultCache,
    normalizer: Normalizer,
    limits: Limits,
}

impl<O: OracleApi> Auditor<O> {
    pub fn new(oracle: O, limits: Limits) -> Self {
        let limiter = RateLimiter::new(limits.rate_limit_per_minute, Duration::from_secs(60));
        let cache = ResultCache::new(limits.cache_ttl());

        Self {
            oracle,
            limiter,
            cache,
            normalizer: Normalizer::new(),
            limits,
        }
    }

    /// Run the scan pipeline for one request.
    pub async fn scan(
        &self,
        code: &str,
        file_name: &str,
        options: &ScanOptions,
    ) -> Result<AuditResult, AuditError> {
        validate(code, file_name, self.limits.max_code_size)?;

        let client_id = options.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID);
        self.limiter.check_and_record(client_id)?;

        let key = fingerprint(code, file_name);
        if !options.skip_cache {
            if let Some(cached) = self.cache.get(&key) {
                info!("Returning cached result for {file_name}");
                return Ok(cached);
            }
        }

        debug!("Cache miss for {file_name}, calling audit engine");
        let raw = self.oracle.scan(code, file_name).await?;
        let result = self.normalizer.normalize_scan(&raw, code, file_name)?;

        if !options.skip_cache {
            self.cache.put(&key, result.clone());
        }

        Ok(result)
    }

    /// Run the fix pipeline. Never touches the cache.
    pub async fn fix(
        &self,
        code: &str,
        file_name: &str,
        findings: &[Finding],
    ) -> Result<String, AuditError> {
        validate(code, file_name, self.limits.max_code_size)?;

        if findings.is_empty() {
            return Err(AuditError::NoFindings);
        }

        let raw = self.oracle.fix(code, file_name, findings).await?;
        self.normalizer.normalize_fix(&raw, code)
    }

    /// Read-only state snapshot. No side effects, not even lazy eviction.
    pub fn stats(&self) -> AuditStats {
        AuditStats {
            cache_size: self.cache.len(),
            rate_limit_entries: self.limiter.entries(),
            config: self.limits.snapshot(),
        }
    }

    /// Empty both the cache and the rate-limiter state. Test/admin hook.
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.cache.clear();
        self.limiter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockOracle;

    const CLEAN_SCAN: &str = r#"{"score": 100, "summary": "clean", "vulnerabilities": []}"#;

    fn limits() -> Limits {
        Limits::default()
    }

    fn one_finding() -> Finding {
        Finding {
            id: "vuln-1-0".to_string(),
            name: "XSS".to_string(),
            severity: crate::models::Severity::High,
            line_start: 1,
            line_end: 1,
            description: "unescaped output".to_string(),
            risk: String::new(),
            attack_scenario: String::new(),
            fix: String::new(),
            confidence: 80,
            cwe_id: None,
            owasp_category: None,
        }
    }

    #[tokio::test]
    async fn test_scan_happy_path() {
        let auditor = Auditor::new(MockOracle::new().with_scan_response(CLEAN_SCAN), limits());

        let result = auditor
            .scan("let a = 1;", "a.js", &ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(result.score, 100);
        assert_eq!(result.code, "let a = 1;");
        assert_eq!(auditor.stats().cache_size, 1);
    }

    #[tokio::test]
    async fn test_second_identical_scan_served_from_cache() {
        // Only ONE response queued: a second remote call would fail
        let auditor = Auditor::new(MockOracle::new().with_scan_response(CLEAN_SCAN), limits());
        let opts = ScanOptions::default();

        let first = auditor.scan("let a = 1;", "a.js", &opts).await.unwrap();
        let second = auditor.scan("let a = 1;", "a.js", &opts).await.unwrap();

        assert_eq!(auditor.oracle.scan_calls(), 1);
        // The cached copy is returned byte-identical, ids included
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_skip_cache_forces_remote_call() {
        let auditor = Auditor::new(
            MockOracle::new()
                .with_scan_response(CLEAN_SCAN)
                .with_scan_response(CLEAN_SCAN),
            limits(),
        );
        let opts = ScanOptions {
            skip_cache: true,
            ..ScanOptions::default()
        };

        auditor.scan("let a = 1;", "a.js", &opts).await.unwrap();
        auditor.scan("let a = 1;", "a.js", &opts).await.unwrap();

        assert_eq!(auditor.oracle.scan_calls(), 2);
        // Bypassed on store as well
        assert_eq!(auditor.stats().cache_size, 0);
    }

    #[tokio::test]
    async fn test_validation_failure_consumes_nothing() {
        let auditor = Auditor::new(MockOracle::new(), limits());

        let err = auditor
            .scan("", "a.js", &ScanOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::EmptyCode));
        assert_eq!(auditor.oracle.scan_calls(), 0);
        // Not even a rate-limit slot was spent
        assert_eq!(auditor.stats().rate_limit_entries, 0);
    }

    #[tokio::test]
    async fn test_rate_limit_enforced_per_client() {
        let mut limits = limits();
        limits.rate_limit_per_minute = 2;
        let auditor = Auditor::new(
            MockOracle::new()
                .with_scan_response(CLEAN_SCAN)
                .with_scan_response(CLEAN_SCAN)
                .with_scan_response(CLEAN_SCAN),
            limits,
        );

        let opts = |id: &str| ScanOptions {
            client_id: Some(id.to_string()),
            skip_cache: true,
        };

        auditor.scan("a", "a.js", &opts("alice")).await.unwrap();
        auditor.scan("b", "b.js", &opts("alice")).await.unwrap();

        let err = auditor.scan("c", "c.js", &opts("alice")).await.unwrap_err();
        assert!(matches!(
            err,
            AuditError::RateLimitExceeded { limit: 2, window_secs: 60 }
        ));

        // Another client still has budget
        auditor.scan("d", "d.js", &opts("bob")).await.unwrap();
    }

    #[tokio::test]
    async fn test_gateway_failure_is_not_cached() {
        let auditor = Auditor::new(
            MockOracle::new().with_scan_error(AuditError::Timeout(30_000)),
            limits(),
        );

        let err = auditor
            .scan("let a = 1;", "a.js", &ScanOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::Timeout(30_000)));
        assert_eq!(auditor.stats().cache_size, 0);
    }

    #[tokio::test]
    async fn test_normalizer_failure_is_not_cached() {
        let auditor = Auditor::new(
            MockOracle::new().with_scan_response(r#"{"score": 150, "summary": ""}"#),
            limits(),
        );

        let err = auditor
            .scan("let a = 1;", "a.js", &ScanOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::InvalidScore(_)));
        assert_eq!(auditor.stats().cache_size, 0);
    }

    #[tokio::test]
    async fn test_fix_happy_path() {
        let auditor = Auditor::new(
            MockOracle::new().with_fix_response("```js\nconst safe = escape(x);\n```"),
            limits(),
        );

        let fixed = auditor
            .fix("const unsafe = x;", "a.js", &[one_finding()])
            .await
            .unwrap();

        assert_eq!(fixed, "const safe = escape(x);");
    }

    #[tokio::test]
    async fn test_fix_with_no_findings_never_calls_oracle() {
        let auditor = Auditor::new(MockOracle::new(), limits());

        let err = auditor.fix("const a = 1;", "a.js", &[]).await.unwrap_err();

        assert!(matches!(err, AuditError::NoFindings));
        assert_eq!(auditor.oracle.fix_calls(), 0);
    }

    #[tokio::test]
    async fn test_fix_bypasses_cache_entirely() {
        let auditor = Auditor::new(
            MockOracle::new().with_fix_response("remediated source body"),
            limits(),
        );

        auditor
            .fix("original source body!", "a.js", &[one_finding()])
            .await
            .unwrap();

        assert_eq!(auditor.stats().cache_size, 0);
    }

    #[tokio::test]
    async fn test_stats_and_clear() {
        let auditor = Auditor::new(MockOracle::new().with_scan_response(CLEAN_SCAN), limits());

        auditor
            .scan("let a = 1;", "a.js", &ScanOptions::default())
            .await
            .unwrap();

        let stats = auditor.stats();
        assert_eq!(stats.cache_size, 1);
        assert_eq!(stats.rate_limit_entries, 1);
        assert_eq!(stats.config.max_code_size, 50_000);
        assert_eq!(stats.config.timeout_ms, 30_000);

        auditor.clear();
        let stats = auditor.stats();
        assert_eq!(stats.cache_size, 0);
        assert_eq!(stats.rate_limit_entries, 0);
    }
}
