use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::Step;

/// Company and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientInfo {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

/// What the event is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInfo {
    pub event_name: String,
    pub event_type: String,
    pub event_description: String,
}

/// What the anchor is expected to bring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnchorRequirements {
    pub anchor_style: Vec<String>,
    pub language: Vec<String>,
    pub additional_requirements: String,
}

/// When and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Logistics {
    pub event_date: String,
    pub event_time: String,
    pub duration: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalInfo {
    pub budget: String,
    pub special_requests: String,
    pub notes: String,
}

/// The whole booking request, accumulated one section at a time.
///
/// Optional text fields are stored as empty strings and optional lists as
/// empty vectors; "unset" and "empty" are the same thing for this form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompositeRequest {
    pub client_info: ClientInfo,
    pub event_info: EventInfo,
    pub anchor_requirements: AnchorRequirements,
    pub logistics: Logistics,
    pub additional_info: AdditionalInfo,
}

/// Value of a single field, as read or written by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Display form: lists are joined with ", ".
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Errors raised when a field is addressed by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAccessError {
    #[error("step '{step}' has no field '{field}'")]
    UnknownField { step: Step, field: String },
    #[error("field '{field}' expects a {expected} value")]
    WrongShape {
        field: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfoPatch {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInfoPatch {
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorRequirementsPatch {
    pub anchor_style: Option<Vec<String>>,
    pub language: Option<Vec<String>>,
    pub additional_requirements: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogisticsPatch {
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalInfoPatch {
    pub budget: Option<String>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for exactly one section. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionPatch {
    ClientInfo(ClientInfoPatch),
    EventInfo(EventInfoPatch),
    AnchorRequirements(AnchorRequirementsPatch),
    Logistics(LogisticsPatch),
    AdditionalInfo(AdditionalInfoPatch),
}

fn push_if(touched: &mut Vec<&'static str>, set: bool, id: &'static str) {
    if set {
        touched.push(id);
    }
}

fn text(field: &str, value: FieldValue) -> Result<Option<String>, FieldAccessError> {
    match value {
        FieldValue::Text(text) => Ok(Some(text)),
        FieldValue::List(_) => Err(FieldAccessError::WrongShape {
            field: field.to_string(),
            expected: "text",
        }),
    }
}

fn list(field: &str, value: FieldValue) -> Result<Option<Vec<String>>, FieldAccessError> {
    match value {
        FieldValue::List(items) => Ok(Some(items)),
        FieldValue::Text(_) => Err(FieldAccessError::WrongShape {
            field: field.to_string(),
            expected: "list",
        }),
    }
}

impl SectionPatch {
    /// Builds a single-field patch for `step` from a field name.
    pub fn field(step: Step, field: &str, value: FieldValue) -> Result<Self, FieldAccessError> {
        let patch = match (step, field) {
            (Step::ClientInfo, "companyName") => SectionPatch::ClientInfo(ClientInfoPatch {
                company_name: text(field, value)?,
                ..Default::default()
            }),
            (Step::ClientInfo, "contactPerson") => SectionPatch::ClientInfo(ClientInfoPatch {
                contact_person: text(field, value)?,
                ..Default::default()
            }),
            (Step::ClientInfo, "email") => SectionPatch::ClientInfo(ClientInfoPatch {
                email: text(field, value)?,
                ..Default::default()
            }),
            (Step::ClientInfo, "phone") => SectionPatch::ClientInfo(ClientInfoPatch {
                phone: text(field, value)?,
                ..Default::default()
            }),
            (Step::EventInfo, "eventName") => SectionPatch::EventInfo(EventInfoPatch {
                event_name: text(field, value)?,
                ..Default::default()
            }),
            (Step::EventInfo, "eventType") => SectionPatch::EventInfo(EventInfoPatch {
                event_type: text(field, value)?,
                ..Default::default()
            }),
            (Step::EventInfo, "eventDescription") => SectionPatch::EventInfo(EventInfoPatch {
                event_description: text(field, value)?,
                ..Default::default()
            }),
            (Step::AnchorRequirements, "anchorStyle") => {
                SectionPatch::AnchorRequirements(AnchorRequirementsPatch {
                    anchor_style: list(field, value)?,
                    ..Default::default()
                })
            }
            (Step::AnchorRequirements, "language") => {
                SectionPatch::AnchorRequirements(AnchorRequirementsPatch {
                    language: list(field, value)?,
                    ..Default::default()
                })
            }
            (Step::AnchorRequirements, "additionalRequirements") => {
                SectionPatch::AnchorRequirements(AnchorRequirementsPatch {
                    additional_requirements: text(field, value)?,
                    ..Default::default()
                })
            }
            (Step::Logistics, "eventDate") => SectionPatch::Logistics(LogisticsPatch {
                event_date: text(field, value)?,
                ..Default::default()
            }),
            (Step::Logistics, "eventTime") => SectionPatch::Logistics(LogisticsPatch {
                event_time: text(field, value)?,
                ..Default::default()
            }),
            (Step::Logistics, "duration") => SectionPatch::Logistics(LogisticsPatch {
                duration: text(field, value)?,
                ..Default::default()
            }),
            (Step::Logistics, "location") => SectionPatch::Logistics(LogisticsPatch {
                location: text(field, value)?,
                ..Default::default()
            }),
            (Step::AdditionalInfo, "budget") => SectionPatch::AdditionalInfo(AdditionalInfoPatch {
                budget: text(field, value)?,
                ..Default::default()
            }),
            (Step::AdditionalInfo, "specialRequests") => {
                SectionPatch::AdditionalInfo(AdditionalInfoPatch {
                    special_requests: text(field, value)?,
                    ..Default::default()
                })
            }
            (Step::AdditionalInfo, "notes") => SectionPatch::AdditionalInfo(AdditionalInfoPatch {
                notes: text(field, value)?,
                ..Default::default()
            }),
            _ => {
                return Err(FieldAccessError::UnknownField {
                    step,
                    field: field.to_string(),
                });
            }
        };
        Ok(patch)
    }

    /// Patch replacing every field of a section with the given values.
    pub fn replace_client_info(section: ClientInfo) -> Self {
        SectionPatch::ClientInfo(ClientInfoPatch {
            company_name: Some(section.company_name),
            contact_person: Some(section.contact_person),
            email: Some(section.email),
            phone: Some(section.phone),
        })
    }

    pub fn replace_event_info(section: EventInfo) -> Self {
        SectionPatch::EventInfo(EventInfoPatch {
            event_name: Some(section.event_name),
            event_type: Some(section.event_type),
            event_description: Some(section.event_description),
        })
    }

    pub fn replace_anchor_requirements(section: AnchorRequirements) -> Self {
        SectionPatch::AnchorRequirements(AnchorRequirementsPatch {
            anchor_style: Some(section.anchor_style),
            language: Some(section.language),
            additional_requirements: Some(section.additional_requirements),
        })
    }

    pub fn replace_logistics(section: Logistics) -> Self {
        SectionPatch::Logistics(LogisticsPatch {
            event_date: Some(section.event_date),
            event_time: Some(section.event_time),
            duration: Some(section.duration),
            location: Some(section.location),
        })
    }

    pub fn replace_additional_info(section: AdditionalInfo) -> Self {
        SectionPatch::AdditionalInfo(AdditionalInfoPatch {
            budget: Some(section.budget),
            special_requests: Some(section.special_requests),
            notes: Some(section.notes),
        })
    }

    /// One full-section patch per step, in step order.
    pub fn replace_all(request: CompositeRequest) -> [SectionPatch; 5] {
        [
            Self::replace_client_info(request.client_info),
            Self::replace_event_info(request.event_info),
            Self::replace_anchor_requirements(request.anchor_requirements),
            Self::replace_logistics(request.logistics),
            Self::replace_additional_info(request.additional_info),
        ]
    }

    /// Step owning the patched section.
    pub fn step(&self) -> Step {
        match self {
            SectionPatch::ClientInfo(_) => Step::ClientInfo,
            SectionPatch::EventInfo(_) => Step::EventInfo,
            SectionPatch::AnchorRequirements(_) => Step::AnchorRequirements,
            SectionPatch::Logistics(_) => Step::Logistics,
            SectionPatch::AdditionalInfo(_) => Step::AdditionalInfo,
        }
    }

    /// Field names this patch writes.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut touched = Vec::new();
        match self {
            SectionPatch::ClientInfo(patch) => {
                push_if(&mut touched, patch.company_name.is_some(), "companyName");
                push_if(&mut touched, patch.contact_person.is_some(), "contactPerson");
                push_if(&mut touched, patch.email.is_some(), "email");
                push_if(&mut touched, patch.phone.is_some(), "phone");
            }
            SectionPatch::EventInfo(patch) => {
                push_if(&mut touched, patch.event_name.is_some(), "eventName");
                push_if(&mut touched, patch.event_type.is_some(), "eventType");
                push_if(
                    &mut touched,
                    patch.event_description.is_some(),
                    "eventDescription",
                );
            }
            SectionPatch::AnchorRequirements(patch) => {
                push_if(&mut touched, patch.anchor_style.is_some(), "anchorStyle");
                push_if(&mut touched, patch.language.is_some(), "language");
                push_if(
                    &mut touched,
                    patch.additional_requirements.is_some(),
                    "additionalRequirements",
                );
            }
            SectionPatch::Logistics(patch) => {
                push_if(&mut touched, patch.event_date.is_some(), "eventDate");
                push_if(&mut touched, patch.event_time.is_some(), "eventTime");
                push_if(&mut touched, patch.duration.is_some(), "duration");
                push_if(&mut touched, patch.location.is_some(), "location");
            }
            SectionPatch::AdditionalInfo(patch) => {
                push_if(&mut touched, patch.budget.is_some(), "budget");
                push_if(
                    &mut touched,
                    patch.special_requests.is_some(),
                    "specialRequests",
                );
                push_if(&mut touched, patch.notes.is_some(), "notes");
            }
        }
        touched
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Returns a new request with `patch` shallow-merged into its section. All
/// other sections are carried over unchanged and `request` is not modified.
pub fn reduce(request: &CompositeRequest, patch: SectionPatch) -> CompositeRequest {
    let mut next = request.clone();
    match patch {
        SectionPatch::ClientInfo(patch) => {
            let section = &mut next.client_info;
            merge(&mut section.company_name, patch.company_name);
            merge(&mut section.contact_person, patch.contact_person);
            merge(&mut section.email, patch.email);
            merge(&mut section.phone, patch.phone);
        }
        SectionPatch::EventInfo(patch) => {
            let section = &mut next.event_info;
            merge(&mut section.event_name, patch.event_name);
            merge(&mut section.event_type, patch.event_type);
            merge(&mut section.event_description, patch.event_description);
        }
        SectionPatch::AnchorRequirements(patch) => {
            let section = &mut next.anchor_requirements;
            merge(&mut section.anchor_style, patch.anchor_style);
            merge(&mut section.language, patch.language);
            merge(
                &mut section.additional_requirements,
                patch.additional_requirements,
            );
        }
        SectionPatch::Logistics(patch) => {
            let section = &mut next.logistics;
            merge(&mut section.event_date, patch.event_date);
            merge(&mut section.event_time, patch.event_time);
            merge(&mut section.duration, patch.duration);
            merge(&mut section.location, patch.location);
        }
        SectionPatch::AdditionalInfo(patch) => {
            let section = &mut next.additional_info;
            merge(&mut section.budget, patch.budget);
            merge(&mut section.special_requests, patch.special_requests);
            merge(&mut section.notes, patch.notes);
        }
    }
    next
}

impl CompositeRequest {
    /// Reads a field of `step`'s section by name.
    pub fn field(&self, step: Step, field: &str) -> Option<FieldValue> {
        let value: FieldValue = match (step, field) {
            (Step::ClientInfo, "companyName") => self.client_info.company_name.as_str().into(),
            (Step::ClientInfo, "contactPerson") => {
                self.client_info.contact_person.as_str().into()
            }
            (Step::ClientInfo, "email") => self.client_info.email.as_str().into(),
            (Step::ClientInfo, "phone") => self.client_info.phone.as_str().into(),
            (Step::EventInfo, "eventName") => self.event_info.event_name.as_str().into(),
            (Step::EventInfo, "eventType") => self.event_info.event_type.as_str().into(),
            (Step::EventInfo, "eventDescription") => {
                self.event_info.event_description.as_str().into()
            }
            (Step::AnchorRequirements, "anchorStyle") => {
                self.anchor_requirements.anchor_style.clone().into()
            }
            (Step::AnchorRequirements, "language") => {
                self.anchor_requirements.language.clone().into()
            }
            (Step::AnchorRequirements, "additionalRequirements") => self
                .anchor_requirements
                .additional_requirements
                .as_str()
                .into(),
            (Step::Logistics, "eventDate") => self.logistics.event_date.as_str().into(),
            (Step::Logistics, "eventTime") => self.logistics.event_time.as_str().into(),
            (Step::Logistics, "duration") => self.logistics.duration.as_str().into(),
            (Step::Logistics, "location") => self.logistics.location.as_str().into(),
            (Step::AdditionalInfo, "budget") => self.additional_info.budget.as_str().into(),
            (Step::AdditionalInfo, "specialRequests") => {
                self.additional_info.special_requests.as_str().into()
            }
            (Step::AdditionalInfo, "notes") => self.additional_info.notes.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_patch_rejects_unknown_names() {
        let err = SectionPatch::field(Step::ClientInfo, "eventName", "x".into()).unwrap_err();
        assert!(matches!(err, FieldAccessError::UnknownField { .. }));
    }

    #[test]
    fn field_patch_rejects_wrong_shape() {
        let err =
            SectionPatch::field(Step::AnchorRequirements, "anchorStyle", "Formal".into())
                .unwrap_err();
        assert_eq!(
            err,
            FieldAccessError::WrongShape {
                field: "anchorStyle".into(),
                expected: "list",
            }
        );
    }

    #[test]
    fn every_descriptor_is_addressable() {
        let request = CompositeRequest::default();
        for step in Step::ALL {
            for spec in step.fields() {
                let value = request
                    .field(step, spec.id)
                    .unwrap_or_else(|| panic!("{} is readable", spec.id));
                assert_eq!(value.as_list().is_some(), spec.kind.is_list(), "{}", spec.id);
                let patch = SectionPatch::field(step, spec.id, value).expect("writable");
                assert_eq!(patch.touched_fields(), vec![spec.id]);
                assert_eq!(patch.step(), step);
            }
        }
    }

    #[test]
    fn reduce_leaves_untouched_fields() {
        let start = reduce(
            &CompositeRequest::default(),
            SectionPatch::field(Step::ClientInfo, "phone", "+1 555".into()).unwrap(),
        );
        let next = reduce(
            &start,
            SectionPatch::field(Step::ClientInfo, "email", "a@b.co".into()).unwrap(),
        );
        assert_eq!(next.client_info.phone, "+1 555");
        assert_eq!(next.client_info.email, "a@b.co");
        assert_eq!(start.client_info.email, "");
    }

    #[test]
    fn request_deserializes_with_missing_sections() {
        let request: CompositeRequest =
            serde_json::from_str(r#"{"clientInfo": {"companyName": "Acme"}}"#).unwrap();
        assert_eq!(request.client_info.company_name, "Acme");
        assert!(request.anchor_requirements.anchor_style.is_empty());
    }
}
