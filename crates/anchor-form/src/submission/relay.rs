use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::submission::SubmissionError;
use crate::submission::payload::RelayPayload;

/// Remote service that forwards a submitted request.
pub trait Relay {
    fn deliver(
        &self,
        payload: &RelayPayload,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

/// JSON-over-HTTP relay (a hosted form backend).
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

impl HttpRelay {
    pub fn new(endpoint: Option<Url>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Option<Url>) -> Self {
        Self { client, endpoint }
    }
}

impl Relay for HttpRelay {
    async fn deliver(&self, payload: &RelayPayload) -> Result<(), SubmissionError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or(SubmissionError::Configuration)?;
        debug!(%endpoint, subject = %payload.subject, "posting request to relay");

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(SubmissionError::Transport)?;

        let outcome = interpret_response(status, &body);
        if let Err(err) = &outcome {
            warn!(status, error = %err, "relay rejected request");
        }
        outcome
    }
}

/// Maps a relay HTTP response to the submission outcome.
///
/// A 2xx answer is a success only when its JSON body carries no `errors`
/// entries; anything else is a relay rejection.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<(), SubmissionError> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .and_then(|value| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Form submission failed with status {status}"));
        return Err(SubmissionError::Relay { status, message });
    }

    let Some(value) = parsed else {
        return Err(SubmissionError::Relay {
            status,
            message: "unreadable relay response".into(),
        });
    };

    let messages = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string())
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        Ok(())
    } else {
        Err(SubmissionError::Relay {
            status,
            message: messages.join(", "),
        })
    }
}
