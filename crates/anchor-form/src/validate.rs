use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{self, ANCHOR_STYLES, BUDGETS, DURATIONS, EVENT_TYPES, LANGUAGES};
use crate::request::{
    AdditionalInfo, AnchorRequirements, ClientInfo, CompositeRequest, EventInfo, Logistics,
};
use crate::spec::Step;

/// Field name to human-readable message. A missing key means the field is valid.
pub type FieldErrors = BTreeMap<String, String>;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern compiles"));

struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn new() -> Self {
        Self {
            errors: FieldErrors::new(),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn required(&mut self, field: &str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.fail(field, message);
            false
        } else {
            true
        }
    }

    fn pattern(&mut self, field: &str, value: &str, pattern: &Regex, message: &str) {
        if !pattern.is_match(value) {
            self.fail(field, message);
        }
    }

    /// Rejects a non-empty value outside `options`.
    fn listed(&mut self, field: &str, value: &str, options: &[&str], message: &str) {
        if !value.trim().is_empty() && !catalog::contains(options, value) {
            self.fail(field, message);
        }
    }

    fn all_listed(&mut self, field: &str, values: &[String], options: &[&str], message: &str) {
        if values.iter().any(|value| !catalog::contains(options, value)) {
            self.fail(field, message);
        }
    }

    fn finish(self) -> FieldErrors {
        self.errors
    }
}

pub fn validate_client_info(section: &ClientInfo) -> FieldErrors {
    let mut check = Checker::new();
    check.required(
        "companyName",
        &section.company_name,
        "Company name is required",
    );
    check.required(
        "contactPerson",
        &section.contact_person,
        "Contact person name is required",
    );
    if check.required("email", &section.email, "Email is required") {
        check.pattern(
            "email",
            &section.email,
            &EMAIL,
            "Please enter a valid email address",
        );
    }
    if check.required("phone", &section.phone, "Phone number is required") {
        check.pattern(
            "phone",
            &section.phone,
            &PHONE,
            "Please enter a valid phone number",
        );
    }
    check.finish()
}

pub fn validate_event_info(section: &EventInfo) -> FieldErrors {
    let mut check = Checker::new();
    check.required("eventName", &section.event_name, "Event name is required");
    if check.required("eventType", &section.event_type, "Event type is required") {
        check.listed(
            "eventType",
            &section.event_type,
            EVENT_TYPES,
            "Please select one of the listed event types",
        );
    }
    check.required(
        "eventDescription",
        &section.event_description,
        "Event description is required",
    );
    check.finish()
}

pub fn validate_anchor_requirements(section: &AnchorRequirements) -> FieldErrors {
    let mut check = Checker::new();
    if section.anchor_style.is_empty() {
        check.fail("anchorStyle", "Please select at least one anchor style");
    } else {
        check.all_listed(
            "anchorStyle",
            &section.anchor_style,
            ANCHOR_STYLES,
            "Please select anchor styles from the list",
        );
    }
    check.all_listed(
        "language",
        &section.language,
        LANGUAGES,
        "Please select languages from the list",
    );
    check.finish()
}

pub fn validate_logistics(section: &Logistics) -> FieldErrors {
    let mut check = Checker::new();
    check.required("eventDate", &section.event_date, "Event date is required");
    check.required("eventTime", &section.event_time, "Event time is required");
    if check.required("duration", &section.duration, "Duration is required") {
        check.listed(
            "duration",
            &section.duration,
            DURATIONS,
            "Please select one of the listed durations",
        );
    }
    check.required("location", &section.location, "Location is required");
    check.finish()
}

pub fn validate_additional_info(section: &AdditionalInfo) -> FieldErrors {
    let mut check = Checker::new();
    check.listed(
        "budget",
        &section.budget,
        BUDGETS,
        "Please select one of the listed budget ranges",
    );
    check.finish()
}

/// Validates the section owned by `step`.
pub fn validate_step(step: Step, request: &CompositeRequest) -> FieldErrors {
    match step {
        Step::ClientInfo => validate_client_info(&request.client_info),
        Step::EventInfo => validate_event_info(&request.event_info),
        Step::AnchorRequirements => validate_anchor_requirements(&request.anchor_requirements),
        Step::Logistics => validate_logistics(&request.logistics),
        Step::AdditionalInfo => validate_additional_info(&request.additional_info),
    }
}

/// Validates every section, keeping only the steps that report errors.
pub fn validate_all(request: &CompositeRequest) -> BTreeMap<Step, FieldErrors> {
    Step::ALL
        .iter()
        .map(|step| (*step, validate_step(*step, request)))
        .filter(|(_, errors)| !errors.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        for good in ["jane@acme.com", "a.b@c.co.uk"] {
            assert!(EMAIL.is_match(good), "{good}");
        }
        for bad in ["jane", "jane@acme", "@acme.com", "ja ne@acme.com", "jane@@acme.com"] {
            assert!(!EMAIL.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn phone_shape() {
        for good in ["+1 555 123 4567", "+1 (555) 123-4567", "5551234"] {
            assert!(PHONE.is_match(good), "{good}");
        }
        for bad in ["555-CALL", "555.123", "#1"] {
            assert!(!PHONE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let errors = validate_client_info(&ClientInfo {
            company_name: "   ".into(),
            contact_person: "Jane".into(),
            email: "jane@acme.com".into(),
            phone: "123".into(),
        });
        assert_eq!(
            errors.get("companyName").map(String::as_str),
            Some("Company name is required")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn required_message_wins_over_format() {
        let errors = validate_client_info(&ClientInfo::default());
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["phone"], "Phone number is required");
    }

    #[test]
    fn optional_budget_is_checked_only_when_set() {
        assert!(validate_additional_info(&AdditionalInfo::default()).is_empty());
        let errors = validate_additional_info(&AdditionalInfo {
            budget: "a lot".into(),
            ..Default::default()
        });
        assert!(errors.contains_key("budget"));
    }
}
