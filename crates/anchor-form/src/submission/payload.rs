use serde::Serialize;

use crate::request::CompositeRequest;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE: &str = "None";

/// Flattened view of a request: one string per field, lists joined with ", ".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestFields {
    pub company_name: String,
    pub contact_person: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_name: String,
    pub event_type: String,
    pub event_description: String,
    pub anchor_style: String,
    pub language: String,
    pub additional_requirements: String,
    pub event_date: String,
    pub event_time: String,
    pub duration: String,
    pub location: String,
    pub budget: String,
    pub special_requests: String,
    pub notes: String,
}

fn or_default(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl RequestFields {
    pub fn from_request(request: &CompositeRequest) -> Self {
        let client = &request.client_info;
        let event = &request.event_info;
        let anchor = &request.anchor_requirements;
        let logistics = &request.logistics;
        let extra = &request.additional_info;
        Self {
            company_name: client.company_name.clone(),
            contact_person: client.contact_person.clone(),
            client_email: client.email.clone(),
            client_phone: client.phone.clone(),
            event_name: event.event_name.clone(),
            event_type: event.event_type.clone(),
            event_description: event.event_description.clone(),
            anchor_style: anchor.anchor_style.join(", "),
            language: anchor.language.join(", "),
            additional_requirements: anchor.additional_requirements.clone(),
            event_date: logistics.event_date.clone(),
            event_time: logistics.event_time.clone(),
            duration: logistics.duration.clone(),
            location: logistics.location.clone(),
            budget: extra.budget.clone(),
            special_requests: extra.special_requests.clone(),
            notes: extra.notes.clone(),
        }
    }

    /// Replaces empty optional values with the relay's placeholders.
    pub fn with_placeholders(self) -> Self {
        Self {
            language: or_default(self.language, NOT_SPECIFIED),
            additional_requirements: or_default(self.additional_requirements, NONE),
            budget: or_default(self.budget, NOT_SPECIFIED),
            special_requests: or_default(self.special_requests, NONE),
            notes: or_default(self.notes, NONE),
            ..self
        }
    }
}

/// JSON body posted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    pub message: String,
    pub subject: String,
    #[serde(rename = "_format")]
    pub format: &'static str,
    #[serde(flatten)]
    pub fields: RequestFields,
}

impl RelayPayload {
    pub fn new(request: &CompositeRequest, message: String) -> Self {
        Self {
            message,
            subject: format!(
                "New Anchor Service Request - {}",
                request.event_info.event_name
            ),
            format: "plain",
            fields: RequestFields::from_request(request).with_placeholders(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AnchorRequirements, EventInfo};

    #[test]
    fn payload_flattens_fields_with_placeholders() {
        let request = CompositeRequest {
            event_info: EventInfo {
                event_name: "Gala".into(),
                ..Default::default()
            },
            anchor_requirements: AnchorRequirements {
                anchor_style: vec!["Formal/Professional".into(), "Authoritative".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let payload = RelayPayload::new(&request, "body".into());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["subject"], "New Anchor Service Request - Gala");
        assert_eq!(value["_format"], "plain");
        assert_eq!(value["message"], "body");
        assert_eq!(value["anchor_style"], "Formal/Professional, Authoritative");
        assert_eq!(value["language"], NOT_SPECIFIED);
        assert_eq!(value["budget"], NOT_SPECIFIED);
        assert_eq!(value["notes"], NONE);
        assert_eq!(value["additional_requirements"], NONE);
        assert!(value.get("fields").is_none());
    }
}
