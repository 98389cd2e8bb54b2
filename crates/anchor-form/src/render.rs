use serde_json::{Map, Value, json};

use crate::notify::Notifier;
use crate::orchestrator::FormOrchestrator;
use crate::progress::{MarkerState, StepMarker, completion_ratio, progress_bar, step_markers};
use crate::request::FieldValue;
use crate::spec::{FieldKind, Step};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The active step is waiting for input.
    Editing,
    /// A submission is in flight.
    Submitting,
    /// The request was accepted.
    Completed,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::Editing => "editing",
            RenderStatus::Submitting => "submitting",
            RenderStatus::Completed => "completed",
        }
    }
}

/// One input of the active step.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    pub current_value: Option<FieldValue>,
    pub error: Option<String>,
    pub choices: &'static [&'static str],
}

/// Everything a front end needs to draw the active step.
#[derive(Debug, Clone)]
pub struct StepPayload {
    pub step: Step,
    pub status: RenderStatus,
    pub ratio: f64,
    pub markers: Vec<StepMarker>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub fields: Vec<RenderField>,
}

pub fn build_step_payload<N: Notifier>(form: &FormOrchestrator<N>) -> StepPayload {
    let step = form.current_step();
    let view = form.view();
    let fields = step
        .fields()
        .iter()
        .map(|spec| RenderField {
            id: spec.id,
            label: spec.label,
            placeholder: spec.placeholder,
            kind: spec.kind,
            required: spec.required,
            current_value: form
                .request()
                .field(step, spec.id)
                .filter(|value| !value.is_blank()),
            error: view.error(spec.id).map(str::to_string),
            choices: spec.choices,
        })
        .collect();

    let status = if form.is_completed() {
        RenderStatus::Completed
    } else if form.is_submitting() {
        RenderStatus::Submitting
    } else {
        RenderStatus::Editing
    };

    StepPayload {
        step,
        status,
        ratio: completion_ratio(step.number(), Step::COUNT),
        markers: step_markers(step),
        can_go_back: view.can_go_back() && !form.is_submitting(),
        can_go_forward: view.can_go_forward(),
        fields,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &StepPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.to_string()));
            map.insert("label".into(), Value::String(field.label.to_string()));
            map.insert("type".into(), Value::String(field.kind.as_str().to_string()));
            map.insert("required".into(), Value::Bool(field.required));
            if let Some(placeholder) = field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.to_string()));
            }
            if let Some(value) = &field.current_value {
                map.insert("current_value".into(), json!(value));
            }
            if let Some(error) = &field.error {
                map.insert("error".into(), Value::String(error.clone()));
            }
            if !field.choices.is_empty() {
                map.insert("choices".into(), json!(field.choices));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "step": payload.step.number(),
        "section": payload.step.section_key(),
        "title": payload.step.title(),
        "intro": payload.step.intro(),
        "status": payload.status.as_str(),
        "progress": {
            "ratio": payload.ratio,
            "markers": payload.markers,
        },
        "actions": {
            "previous": payload.can_go_back,
            "next": payload.can_go_forward,
            "submit": payload.step.is_last() && payload.status == RenderStatus::Editing,
        },
        "fields": fields,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &StepPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Step {} of {}: {}",
        payload.step.number(),
        Step::COUNT,
        payload.step.title()
    ));
    lines.push(progress_bar(payload.ratio, 20));
    lines.push(
        payload
            .markers
            .iter()
            .map(marker_label)
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.push(payload.step.intro().to_string());
    if payload.status != RenderStatus::Editing {
        lines.push(format!("Status: {}", payload.status.as_str()));
    }

    for field in &payload.fields {
        let mut entry = format!(" - {}", field.label);
        if field.required {
            entry.push_str(" *");
        }
        if let Some(value) = &field.current_value {
            entry.push_str(&format!(" = {}", value.display()));
        }
        lines.push(entry);
        if let Some(error) = &field.error {
            lines.push(format!("   ! {error}"));
        }
    }

    lines.join("\n")
}

fn marker_label(marker: &StepMarker) -> String {
    match marker.state {
        MarkerState::Completed => format!("[✓] {}", marker.label),
        MarkerState::Current => format!("[{}] {}", marker.number, marker.label),
        MarkerState::Upcoming => format!(" {}  {}", marker.number, marker.label),
    }
}
