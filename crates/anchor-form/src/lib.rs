#![allow(missing_docs)]

pub mod catalog;
pub mod config;
pub mod notify;
pub mod orchestrator;
pub mod progress;
pub mod render;
pub mod request;
pub mod schema;
pub mod spec;
pub mod step_view;
pub mod submission;
pub mod summary;
pub mod validate;

pub use config::{ConfigError, FormConfig, MessagingConfig};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use orchestrator::{
    FormOrchestrator, Phase, StepError, SubmissionTicket, SubmitOutcome, SubmitRejection,
};
pub use progress::{MarkerState, StepMarker, completion_ratio, step_markers};
pub use render::{RenderField, RenderStatus, StepPayload, build_step_payload, render_json_ui, render_text};
pub use request::{
    AdditionalInfo, AnchorRequirements, ClientInfo, CompositeRequest, EventInfo, FieldAccessError,
    FieldValue, Logistics, SectionPatch, reduce,
};
pub use schema::request_schema;
pub use spec::{FieldKind, FieldSpec, Step};
pub use step_view::StepView;
pub use submission::{
    ComposeError, HttpRelay, MessageTemplates, Relay, RelayPayload, SubmissionError, Submitter,
    build_messaging_link,
};
pub use summary::ResultView;
pub use validate::{FieldErrors, validate_all, validate_step};
