use anchor_form::{
    CompositeRequest, FieldKind, Step, validate::validate_event_info, validate_all, validate_step,
};
use anchor_form::{EventInfo, Logistics};

fn complete_request() -> CompositeRequest {
    serde_json::from_str(include_str!("fixtures/complete_request.json")).expect("fixture")
}

#[test]
fn complete_request_passes_every_step() {
    assert!(validate_all(&complete_request()).is_empty());
}

#[test]
fn empty_request_reports_required_steps_only() {
    let errors = validate_all(&CompositeRequest::default());
    let steps: Vec<_> = errors.keys().copied().collect();
    assert_eq!(
        steps,
        vec![
            Step::ClientInfo,
            Step::EventInfo,
            Step::AnchorRequirements,
            Step::Logistics
        ]
    );
    assert_eq!(errors[&Step::ClientInfo].len(), 4);
    assert_eq!(errors[&Step::EventInfo]["eventName"], "Event name is required");
    assert_eq!(errors[&Step::Logistics]["location"], "Location is required");
}

#[test]
fn error_keys_match_field_descriptors() {
    let errors = validate_all(&CompositeRequest::default());
    for (step, fields) in errors {
        for id in fields.keys() {
            assert!(step.field(id).is_some(), "{step} has no field {id}");
        }
    }
}

#[test]
fn invalid_email_and_phone_are_reported() {
    let mut request = complete_request();
    request.client_info.email = "jane@acme".into();
    request.client_info.phone = "call me".into();

    let errors = validate_step(Step::ClientInfo, &request);
    assert_eq!(errors["email"], "Please enter a valid email address");
    assert_eq!(errors["phone"], "Please enter a valid phone number");
}

#[test]
fn choice_fields_must_come_from_their_catalog() {
    let errors = validate_event_info(&EventInfo {
        event_name: "Gala".into(),
        event_type: "Rave".into(),
        event_description: "Late night".into(),
    });
    assert_eq!(
        errors["eventType"],
        "Please select one of the listed event types"
    );

    let mut request = complete_request();
    request.anchor_requirements.language = vec!["Klingon".into()];
    request.logistics = Logistics {
        duration: "forever".into(),
        ..request.logistics.clone()
    };
    assert!(validate_step(Step::AnchorRequirements, &request).contains_key("language"));
    assert!(validate_step(Step::Logistics, &request).contains_key("duration"));
}

#[test]
fn every_choice_descriptor_carries_a_catalog() {
    for step in Step::ALL {
        for field in step.fields() {
            let is_choice = matches!(field.kind, FieldKind::Choice | FieldKind::MultiChoice);
            assert_eq!(is_choice, !field.choices.is_empty(), "{}", field.id);
        }
    }
}
