//! HTTP client for the draft-generation service.
//!
//! Backend delegation only: the client ships instructions plus case data
//! to the drafting service and never holds a generation-engine
//! credential. One request per generation attempt, no retries here;
//! retrying is the session controller's caller's decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use vakil_core::{DraftRequest, Language};

use crate::template::build_prompt;

/// Engine output shorter than this is a refusal in disguise, not a
/// petition.
const MIN_DRAFT_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Transport-level failure reaching the service. Timeouts surface
    /// here too and are treated identically.
    #[error("draft service unreachable: {0}")]
    Unavailable(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("draft service returned {status}: {body}")]
    Server { status: u16, body: String },
    /// The engine responded but produced no usable draft.
    #[error("draft engine produced no usable content")]
    Rejected,
    /// A frozen request that cannot serialise is a programming error
    /// upstream, not a user-recoverable condition.
    #[error("request serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can turn a finalized request into document text.
///
/// The session controller depends on this seam rather than on the HTTP
/// transport, so its state machine is testable with stub engines.
pub trait DraftEngine {
    // Awaited on the caller's own task; no Send bound is imposed.
    #[allow(async_fn_in_trait)]
    async fn generate(
        &self,
        request: &DraftRequest,
        language: Language,
    ) -> Result<String, GenerateError>;
}

/// HTTP client for the drafting service's generation endpoint.
pub struct DraftClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    instructions: String,
    data: &'a DraftRequest,
    language: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    draft: String,
}

impl DraftClient {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:5000` (no trailing
    /// slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit one generation attempt and return the document text.
    ///
    /// The engine's output is trusted, pre-formatted content and is
    /// returned verbatim; this layer only vets that something usable came
    /// back.
    pub async fn generate(
        &self,
        request: &DraftRequest,
        language: Language,
    ) -> Result<String, GenerateError> {
        let instructions = build_prompt(request, language)?;
        let url = format!("{}/api/generate-draft", self.base_url);

        info!(url = %url, category = %request.petition_type, language = %language, "requesting draft generation");
        let resp = self
            .client
            .post(&url)
            .json(&GenerateBody {
                instructions,
                data: request,
                language: language.code(),
            })
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 502 {
            // The service proxies the engine; 502 means it answered but
            // declined or produced nothing.
            return Err(GenerateError::Rejected);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = resp.json().await?;
        let draft = vet_draft(body.draft)?;
        info!(chars = draft.len(), "draft received");
        Ok(draft)
    }
}

impl DraftEngine for DraftClient {
    async fn generate(
        &self,
        request: &DraftRequest,
        language: Language,
    ) -> Result<String, GenerateError> {
        DraftClient::generate(self, request, language).await
    }
}

/// Reject blank or trivially short bodies instead of presenting them as
/// documents; anything else passes through untouched.
fn vet_draft(draft: String) -> Result<String, GenerateError> {
    if draft.trim().len() < MIN_DRAFT_LEN {
        return Err(GenerateError::Rejected);
    }
    Ok(draft)
}
