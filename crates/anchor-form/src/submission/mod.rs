//! Fan-out of a completed request: the relay call that delivers it and the
//! messaging deep link offered afterwards.

pub mod messaging;
pub mod payload;
pub mod relay;
pub mod template;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::config::{FormConfig, MessagingConfig};
use crate::request::CompositeRequest;

pub use messaging::build_messaging_link;
pub use payload::{RelayPayload, RequestFields};
pub use relay::{HttpRelay, Relay, interpret_response};
pub use template::{ComposeError, MessageTemplates};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("relay endpoint is not configured; set ANCHOR_RELAY_ENDPOINT")]
    Configuration,
    #[error("could not reach the relay: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("relay rejected the request ({status}): {message}")]
    Relay { status: u16, message: String },
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

impl SubmissionError {
    /// Configuration problems need a redeploy; everything else may be retried.
    pub fn is_retriable(&self) -> bool {
        !matches!(self, SubmissionError::Configuration)
    }

    /// Message for the notification sink.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Configuration => {
                "Submissions are not configured yet. Please contact us directly.".to_string()
            }
            SubmissionError::Transport(_) => {
                "Failed to send your request. Please check your connection and try again."
                    .to_string()
            }
            SubmissionError::Relay { message, .. } => {
                format!("Failed to submit form: {message}. Please try again.")
            }
            SubmissionError::Compose(_) => {
                "Failed to prepare your request. Please try again later.".to_string()
            }
        }
    }
}

/// Adapter between a finished request and its delivery channels.
pub struct Submitter<R> {
    relay: R,
    templates: MessageTemplates,
    messaging: MessagingConfig,
}

impl Submitter<HttpRelay> {
    /// HTTP relay submitter built from configuration.
    pub fn from_config(config: &FormConfig) -> Result<Self, ComposeError> {
        Self::new(
            HttpRelay::new(config.relay_endpoint.clone()),
            config.messaging.clone(),
        )
    }
}

impl<R: Relay> Submitter<R> {
    pub fn new(relay: R, messaging: MessagingConfig) -> Result<Self, ComposeError> {
        Ok(Self {
            relay,
            templates: MessageTemplates::new()?,
            messaging,
        })
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn templates(&self) -> &MessageTemplates {
        &self.templates
    }

    /// Relay body for `request`, stamped with `submitted_at`.
    pub fn payload(
        &self,
        request: &CompositeRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<RelayPayload, ComposeError> {
        let stamp = submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let message = self
            .templates
            .relay_message(&RequestFields::from_request(request), &stamp)?;
        Ok(RelayPayload::new(request, message))
    }

    /// Delivers `request` to the relay.
    pub async fn submit(&self, request: &CompositeRequest) -> Result<(), SubmissionError> {
        let payload = self.payload(request, Utc::now())?;
        match self.relay.deliver(&payload).await {
            Ok(()) => {
                info!(event = %request.event_info.event_name, "request accepted by relay");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "request submission failed");
                Err(err)
            }
        }
    }

    pub fn messaging_link(&self, request: &CompositeRequest) -> Result<Url, ComposeError> {
        build_messaging_link(&self.messaging, &self.templates, request)
    }
}
