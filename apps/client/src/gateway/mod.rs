//! Scoring Gateway: the single point of entry for all backend HTTP calls.
//!
//! No other module talks to the scoring/candidate service directly.
//! Every call shares one base URL and one bounded timeout, and every failure
//! (transport, timeout, non-success status, undecodable body) surfaces as a
//! `GatewayError` carrying the original cause. Nothing is retried here.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::encoder::{FilePart, MultipartPayload, FILE_FIELD, JOB_SKILLS_FIELD, JOB_TEXT_FIELD};
use crate::errors::GatewayError;
use crate::models::{AnalysisResult, CandidateList, RawCandidate};

const PARSE_RESUME_PATH: &str = "parse-resume";
const CANDIDATES_PATH: &str = "candidates";

/// Backend operations the pipeline depends on. Implement this to swap the
/// transport without touching the upload session or the candidate directory.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    /// `POST /parse-resume`
    async fn submit(&self, payload: MultipartPayload) -> Result<AnalysisResult, GatewayError>;

    /// `GET /candidates`
    async fn list_candidates(&self) -> Result<Vec<RawCandidate>, GatewayError>;

    /// `GET /candidates/{id}`
    async fn get_candidate(&self, id: &str) -> Result<RawCandidate, GatewayError>;
}

/// reqwest-backed gateway.
#[derive(Clone)]
pub struct HttpScoringGateway {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpScoringGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::Transport)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL, keeping any
    /// path prefix it already has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn classify(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
                source: error,
            }
        } else {
            GatewayError::Transport(error)
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        route: &'static str,
    ) -> Result<T, GatewayError> {
        let started = Instant::now();

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(route, status = status.as_u16(), "backend returned non-success status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(
            route,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "backend call succeeded"
        );

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ScoringGateway for HttpScoringGateway {
    async fn submit(&self, payload: MultipartPayload) -> Result<AnalysisResult, GatewayError> {
        let url = self.endpoint(&[PARSE_RESUME_PATH])?;
        let form = build_form(payload).await?;

        info!(%url, "submitting résumé for analysis");
        // reqwest sets multipart/form-data with a generated boundary
        self.execute(self.client.post(url).multipart(form), "POST /parse-resume")
            .await
    }

    async fn list_candidates(&self) -> Result<Vec<RawCandidate>, GatewayError> {
        let url = self.endpoint(&[CANDIDATES_PATH])?;
        let list: CandidateList = self.execute(self.client.get(url), "GET /candidates").await?;
        Ok(list.into_items())
    }

    async fn get_candidate(&self, id: &str) -> Result<RawCandidate, GatewayError> {
        let url = self.endpoint(&[CANDIDATES_PATH, id])?;
        self.execute(self.client.get(url), "GET /candidates/{id}")
            .await
    }
}

/// Turns the payload into a wire form, reading referenced files now.
async fn build_form(payload: MultipartPayload) -> Result<Form, GatewayError> {
    let (file, job_skills, job_text) = payload.into_parts();
    let media_type = file.media_type();

    let (file_name, bytes) = match file {
        FilePart::Blob { file_name, bytes } => (file_name, bytes.to_vec()),
        FilePart::Reference {
            locator, file_name, ..
        } => match tokio::fs::read(&locator).await {
            Ok(bytes) => (file_name, bytes),
            Err(source) => return Err(GatewayError::FileRead { locator, source }),
        },
    };

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(media_type)
        .map_err(GatewayError::Transport)?;

    Ok(Form::new()
        .part(FILE_FIELD, part)
        .text(JOB_SKILLS_FIELD, job_skills)
        .text(JOB_TEXT_FIELD, job_text))
}
