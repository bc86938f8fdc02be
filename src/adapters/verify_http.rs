//! HTTP transport for the verification authority.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::adapters::verify::{GuessRecord, ResolvedAnswer, VerificationService};
use crate::domain::state::RoundId;
use crate::error::FlowError;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Serialize)]
struct SubmitGuessRequest<'a> {
    guess: &'a str,
}

/// `VerificationService` backed by the game's HTTP API.
pub struct HttpVerificationService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpVerificationService {
    /// Build a client with a per-request deadline.
    ///
    /// The deadline bounds every attempt independently of the retry
    /// ladder, so a hung request cannot stall the sequence.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, FlowError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| FlowError::config(format!("verification client: {err}")))?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn map_transport(err: reqwest::Error) -> DomainError {
        if err.is_timeout() {
            DomainError::infra(InfraErrorKind::Timeout, "verification request timed out")
        } else {
            DomainError::infra(InfraErrorKind::Upstream, err.to_string())
        }
    }
}

#[async_trait]
impl VerificationService for HttpVerificationService {
    async fn submit_guess(
        &self,
        round_id: RoundId,
        option_text: &str,
    ) -> Result<GuessRecord, DomainError> {
        let url = format!("{}/rounds/{round_id}/guesses", self.base_url);
        debug!(round_id, url = %url, "submitting guess");

        let response = self
            .http
            .post(&url)
            .json(&SubmitGuessRequest { guess: option_text })
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(DomainError::infra(
                InfraErrorKind::Upstream,
                format!("submit guess returned {}", response.status()),
            ));
        }

        response.json::<GuessRecord>().await.map_err(|err| {
            DomainError::infra(InfraErrorKind::Upstream, format!("guess record body: {err}"))
        })
    }

    async fn resolve_answer(
        &self,
        round_id: RoundId,
        language: &str,
    ) -> Result<ResolvedAnswer, DomainError> {
        let url = format!("{}/rounds/{round_id}/answer", self.base_url);
        debug!(round_id, url = %url, language, "resolving answer");

        let response = self
            .http
            .get(&url)
            .query(&[("lang", language)])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(DomainError::infra(
                InfraErrorKind::Upstream,
                format!("resolve answer returned {}", response.status()),
            ));
        }

        response.json::<ResolvedAnswer>().await.map_err(|err| {
            DomainError::infra(InfraErrorKind::Upstream, format!("answer body: {err}"))
        })
    }
}
