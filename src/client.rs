use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{SchemaError, SubmitError};
use crate::schema;
use crate::signature;

/// Maximum length the service accepts for the Log-Type header.
pub const LOG_TYPE_MAX_LEN: usize = 100;

const BODY_SAMPLE_LEN: usize = 500;

/// Client for the Log Analytics HTTP data collector endpoint.
///
/// Holds the decoded shared key and a pooled HTTP client; cheap to clone
/// and safe to use from concurrent tasks. Each submission is an
/// independent attempt with no retry and no state across calls.
#[derive(Clone)]
pub struct LogAnalyticsClient {
    client: Client,
    url: String,
    workspace_id: String,
    key: Vec<u8>,
    time_generated_field: String,
}

impl LogAnalyticsClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let key = B64
            .decode(cfg.shared_key.trim())
            .context("shared key is not valid base64")?;
        let client = Client::builder()
            .timeout(cfg.http_timeout())
            .pool_max_idle_per_host(8)
            .build()?;
        Ok(Self {
            client,
            url: cfg.ingestion_url(),
            workspace_id: cfg.workspace_id.clone(),
            key,
            time_generated_field: String::new(),
        })
    }

    /// Name the record field the service should read the event timestamp
    /// from. Left empty, ingestion time is used.
    #[must_use]
    pub fn with_time_generated_field(mut self, field: impl Into<String>) -> Self {
        self.time_generated_field = field.into();
        self
    }

    pub fn ingestion_url(&self) -> &str {
        &self.url
    }

    /// Submit a single record under `log_type`.
    pub async fn submit_one<T: Serialize>(
        &self,
        entity: &T,
        log_type: &str,
    ) -> Result<(), SubmitError> {
        self.submit_many(std::slice::from_ref(entity), log_type)
            .await
    }

    /// Submit a batch of records under `log_type` in one request.
    ///
    /// The batch is all-or-nothing: arguments and record schemas are
    /// checked up front and the first failure aborts the call before any
    /// network activity. Element order in the serialized array matches
    /// input order. A non-2xx response is an error carrying the status.
    pub async fn submit_many<T: Serialize>(
        &self,
        entities: &[T],
        log_type: &str,
    ) -> Result<(), SubmitError> {
        if entities.is_empty() {
            return Err(SubmitError::InvalidArgument(
                "parameter 'entities' cannot be empty",
            ));
        }
        if log_type.chars().count() > LOG_TYPE_MAX_LEN {
            return Err(SubmitError::InvalidArgument(
                "logType exceeds the 100 character limit",
            ));
        }
        if log_type.is_empty() || !log_type.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SubmitError::InvalidArgument(
                "logType can only contain alphabetic characters",
            ));
        }
        for entity in entities {
            schema::validate(entity)?;
        }

        let date = signature::format_rfc1123(Utc::now());
        let body = serde_json::to_vec(entities).map_err(|err| SchemaError::Unserializable {
            record_type: std::any::type_name::<T>(),
            message: err.to_string(),
        })?;
        let auth = signature::auth_signature(&self.workspace_id, &self.key, &date, body.len());

        let resp = self
            .client
            .post(&self.url)
            .header("Authorization", auth)
            .header("Log-Type", log_type)
            .header("Accept", "application/json")
            .header("x-ms-date", &date)
            .header("time-generated-field", self.time_generated_field.as_str())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = resp.status();
        // Drain the body so the pooled connection can be reused.
        let resp_body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status,
                body_sample: truncate_body_snippet(&resp_body, BODY_SAMPLE_LEN),
            });
        }

        debug!(
            "log analytics sent batch={} log_type={} status={}",
            entities.len(),
            log_type,
            status
        );
        Ok(())
    }
}

fn truncate_body_snippet(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}
