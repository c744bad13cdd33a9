//! Gemini API client implementation
//!
//! Sends generateContent requests to the Gemini REST API and maps transport
//! outcomes onto the audit error taxonomy. Every call races a timeout; on
//! expiry the in-flight request is dropped, a client-side abandon with no
//! guarantee of server-side cancellation.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use super::{OracleApi, OracleResult};
use crate::error::AuditError;
use crate::models::Finding;

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for both audit and remediation calls
const MODEL: &str = "gemini-3-pro-preview";

const SCAN_SYSTEM_INSTRUCTION: &str = r#"You are the "SecureCode AI Deep Audit Engine v3.0". You run a formal 4-pass algorithm on every file:

1. AST & SCOPE MAPPING: identify all variables, function scopes, and external dependencies.
2. SOURCE-TO-SINK DATAFLOW: trace every untrusted input to sensitive sinks (DB query, HTML render, system command) and note missing validation.
3. RULE VALIDATION: apply OWASP Top 10 and SANS 25 rules; check for hardcoded secrets, insecure crypto, and logical flaws.
4. FALSE POSITIVE FILTER: discard any finding that is not exploitable in a real environment.

SCORING:
- 100: no exploitable vulnerabilities.
- 80-99: minor hygiene or best-practice issues.
- 50-79: moderate risks (High/Medium).
- 0-49: critical exploitable flaws (RCE, SQLi, auth bypass).

Respond with a single JSON object: {"score": <integer 0-100>, "summary": <string, max 500 chars>, "vulnerabilities": [{"name", "severity" (Critical|High|Medium|Low), "lineStart" (1-indexed integer), "lineEnd", "description", "risk", "attackScenario", "fix", "confidence" (integer 0-100), "cweId" (optional), "owaspCategory" (optional)}]}.
Be precise with line numbers, include CWE IDs and OWASP categories where applicable, and report only exploitable vulnerabilities, not style issues."#;

const FIX_SYSTEM_INSTRUCTION: &str = r#"You are a senior security architect. Rewrite the given code to eliminate the listed vulnerabilities using industry standards (parameterized queries, input sanitization, proper authentication, output encoding, least privilege). The business logic must remain identical and the original coding style should be preserved. Add brief comments explaining each security improvement. Return ONLY the remediated source code, with no conversational text and no markdown formatting."#;

/// Gemini API client
pub struct GeminiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: ContentBlock,
    contents: Vec<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Serialize)]
struct ContentBlock {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl ContentBlock {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

/// Build the scan prompt around the caller's code.
fn scan_prompt(code: &str, file_name: &str) -> String {
    format!(
        "Perform a Deep Security Audit on file: \"{file_name}\"\n\n\
         File size: {} characters\n\n\
         CODE:\n{code}",
        code.len()
    )
}

/// Build the fix prompt: a findings digest plus the original source.
fn fix_prompt(code: &str, file_name: &str, findings: &[Finding]) -> String {
    let digest: Vec<String> = findings
        .iter()
        .map(|f| {
            format!(
                "- [{}] {} (Lines {}-{}): {}",
                f.severity, f.name, f.line_start, f.line_end, f.description
            )
        })
        .collect();

    format!(
        "FILE: {file_name}\n\
         VULNERABILITIES TO REMEDIATE:\n{}\n\n\
         ORIGINAL SOURCE CODE:\n{code}\n\n\
         Provide the secure, remediated version of this code.",
        digest.join("\n")
    )
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// `DEEPAUDIT_API_HOST` overrides the base URL for development and
    /// testing against a local server.
    pub fn new(api_key: Option<String>, timeout: Duration) -> OracleResult<Self> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| AuditError::UpstreamUnavailable(e.to_string()))?;

        let base_url = std::env::var("DEEPAUDIT_API_HOST")
            .unwrap_or_else(|_| API_BASE_URL.to_string());

        Ok(Self {
            http,
            base_url,
            api_key,
            timeout,
        })
    }

    /// Credential check, before any network attempt.
    fn api_key(&self) -> OracleResult<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AuditError::MissingCredential)
    }

    /// Send one generateContent request, racing it against the timeout.
    async fn generate(&self, request: &GenerateRequest) -> OracleResult<String> {
        let api_key = self.api_key()?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL);

        let call = self.send_and_extract(&url, api_key, request);
        tokio::select! {
            result = call => result,
            _ = sleep(self.timeout) => {
                debug!("Remote call abandoned after {}ms", self.timeout.as_millis());
                Err(AuditError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    async fn send_and_extract(
        &self,
        url: &str,
        api_key: &str,
        request: &GenerateRequest,
    ) -> OracleResult<String> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AuditError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body: GenerateResponse = response.json().await.map_err(|e| {
                    AuditError::MalformedResponse(format!("Failed to parse response: {e}"))
                })?;

                let text: String = body
                    .candidates
                    .first()
                    .map(|c| {
                        c.content
                            .parts
                            .iter()
                            .map(|p| p.text.as_str())
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .ok_or_else(|| {
                        AuditError::MalformedResponse("Response contained no candidates".to_string())
                    })?;

                Ok(text)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuditError::InvalidCredential),
            StatusCode::TOO_MANY_REQUESTS => Err(AuditError::UpstreamRateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(AuditError::UpstreamUnavailable(format!(
                    "status {status}: {body}"
                )))
            }
        }
    }
}

#[async_trait]
impl OracleApi for GeminiClient {
    async fn scan(&self, code: &str, file_name: &str) -> OracleResult<String> {
        let request = GenerateRequest {
            system_instruction: ContentBlock::text(SCAN_SYSTEM_INSTRUCTION.to_string()),
            contents: vec![ContentBlock::text(scan_prompt(code, file_name))],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        self.generate(&request).await
    }

    async fn fix(
        &self,
        code: &str,
        file_name: &str,
        findings: &[Finding],
    ) -> OracleResult<String> {
        let request = GenerateRequest {
            system_instruction: ContentBlock::text(FIX_SYSTEM_INSTRUCTION.to_string()),
            contents: vec![ContentBlock::text(fix_prompt(code, file_name, findings))],
            generation_config: None,
        };

        self.generate(&request).await
    }
}
