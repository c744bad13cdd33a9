//! Scripted oracle for orchestrator tests
//!
//! Queues raw responses and errors per operation and counts invocations so
//! tests can assert on cache hits and short-circuited pipelines.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{OracleApi, OracleResult};
use crate::error::AuditError;
use crate::models::Finding;

#[derive(Default)]
pub struct MockOracle {
    scan_queue: Mutex<VecDeque<OracleResult<String>>>,
    fix_queue: Mutex<VecDeque<OracleResult<String>>>,
    scan_calls: AtomicUsize,
    fix_calls: AtomicUsize,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw scan response (the JSON text the engine would return).
    pub fn with_scan_response(self, raw: &str) -> Self {
        self.scan_queue
            .lock()
            .unwrap()
            .push_back(Ok(raw.to_string()));
        self
    }

    pub fn with_scan_error(self, err: AuditError) -> Self {
        self.scan_queue.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_fix_response(self, raw: &str) -> Self {
        self.fix_queue
            .lock()
            .unwrap()
            .push_back(Ok(raw.to_string()));
        self
    }

    pub fn with_fix_error(self, err: AuditError) -> Self {
        self.fix_queue.lock().unwrap().push_back(Err(err));
        self
    }

    /// How many times `scan` reached the oracle.
    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    /// How many times `fix` reached the oracle.
    pub fn fix_calls(&self) -> usize {
        self.fix_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OracleApi for MockOracle {
    async fn scan(&self, _code: &str, _file_name: &str) -> OracleResult<String> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        self.scan_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AuditError::UpstreamUnavailable(
                    "mock scan queue exhausted".to_string(),
                ))
            })
    }

    async fn fix(
        &self,
        _code: &str,
        _file_name: &str,
        _findings: &[Finding],
    ) -> OracleResult<String> {
        self.fix_calls.fetch_add(1, Ordering::SeqCst);
        self.fix_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AuditError::UpstreamUnavailable(
                    "mock fix queue exhausted".to_string(),
                ))
            })
    }
}
