use std::fmt;

use serde::Serialize;

use crate::catalog::{ANCHOR_STYLES, BUDGETS, DURATIONS, EVENT_TYPES, LANGUAGES};
use crate::spec::field::{FieldKind, FieldSpec};

/// One step of the request form. Each step owns exactly one section of the
/// composite request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    ClientInfo,
    EventInfo,
    AnchorRequirements,
    Logistics,
    AdditionalInfo,
}

const CLIENT_INFO_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("companyName", "Company/Organization Name")
        .placeholder("Enter your company name"),
    FieldSpec::text("contactPerson", "Contact Person Name").placeholder("Your full name"),
    FieldSpec::text("email", "Email Address")
        .kind(FieldKind::Email)
        .placeholder("your.email@company.com"),
    FieldSpec::text("phone", "Phone Number")
        .kind(FieldKind::Phone)
        .placeholder("+1 (555) 123-4567"),
];

const EVENT_INFO_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("eventName", "Event/Show Name")
        .placeholder("e.g., Annual Corporate Awards Night"),
    FieldSpec::text("eventType", "Event Type").choices(FieldKind::Choice, EVENT_TYPES),
    FieldSpec::text("eventDescription", "Event Description")
        .kind(FieldKind::LongText)
        .placeholder("Describe the event, its purpose, and what kind of anchoring you need..."),
];

const ANCHOR_REQUIREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("anchorStyle", "Preferred Anchor Style")
        .choices(FieldKind::MultiChoice, ANCHOR_STYLES),
    FieldSpec::text("language", "Language Requirements")
        .choices(FieldKind::MultiChoice, LANGUAGES)
        .optional(),
    FieldSpec::text("additionalRequirements", "Additional Requirements")
        .kind(FieldKind::LongText)
        .placeholder("Any other specific requirements or preferences for the anchor...")
        .optional(),
];

const LOGISTICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("eventDate", "Event Date").kind(FieldKind::Date),
    FieldSpec::text("eventTime", "Event Time").kind(FieldKind::Time),
    FieldSpec::text("duration", "Duration").choices(FieldKind::Choice, DURATIONS),
    FieldSpec::text("location", "Location/Venue").placeholder("Enter venue address or location"),
];

const ADDITIONAL_INFO_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("budget", "Budget Range")
        .choices(FieldKind::Choice, BUDGETS)
        .optional(),
    FieldSpec::text("specialRequests", "Special Requests")
        .kind(FieldKind::LongText)
        .placeholder("Any special requests or requirements for the anchor...")
        .optional(),
    FieldSpec::text("notes", "Additional Notes")
        .kind(FieldKind::LongText)
        .placeholder("Any other information you'd like to share...")
        .optional(),
];

impl Step {
    pub const ALL: [Step; 5] = [
        Step::ClientInfo,
        Step::EventInfo,
        Step::AnchorRequirements,
        Step::Logistics,
        Step::AdditionalInfo,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const FIRST: Step = Step::ClientInfo;

    pub const LAST: Step = Step::AdditionalInfo;

    /// 1-based position of the step.
    pub fn number(self) -> usize {
        match self {
            Step::ClientInfo => 1,
            Step::EventInfo => 2,
            Step::AnchorRequirements => 3,
            Step::Logistics => 4,
            Step::AdditionalInfo => 5,
        }
    }

    pub fn from_number(number: usize) -> Option<Step> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    pub fn next(self) -> Option<Step> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Short label shown on the progress indicator.
    pub fn label(self) -> &'static str {
        match self {
            Step::ClientInfo => "Company",
            Step::EventInfo => "Event",
            Step::AnchorRequirements => "Requirements",
            Step::Logistics => "Logistics",
            Step::AdditionalInfo => "Additional",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::ClientInfo => "Your Information",
            Step::EventInfo => "Event Details",
            Step::AnchorRequirements => "What You Need",
            Step::Logistics => "Date & Location",
            Step::AdditionalInfo => "Extra Details",
        }
    }

    /// Heading of the step view.
    pub fn title(self) -> &'static str {
        match self {
            Step::ClientInfo => "Company Information",
            Step::EventInfo => "Event Details",
            Step::AnchorRequirements => "Anchor Requirements",
            Step::Logistics => "Event Logistics",
            Step::AdditionalInfo => "Additional Information",
        }
    }

    pub fn intro(self) -> &'static str {
        match self {
            Step::ClientInfo => "Tell us about your company or organization",
            Step::EventInfo => "Tell us about the event or show you need anchoring for",
            Step::AnchorRequirements => {
                "What do you need from the anchor? Select all that apply"
            }
            Step::Logistics => "When and where will the event take place?",
            Step::AdditionalInfo => "Any other details about your requirements",
        }
    }

    /// Key of the owned section inside the serialized request.
    pub fn section_key(self) -> &'static str {
        match self {
            Step::ClientInfo => "clientInfo",
            Step::EventInfo => "eventInfo",
            Step::AnchorRequirements => "anchorRequirements",
            Step::Logistics => "logistics",
            Step::AdditionalInfo => "additionalInfo",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Step::ClientInfo => CLIENT_INFO_FIELDS,
            Step::EventInfo => EVENT_INFO_FIELDS,
            Step::AnchorRequirements => ANCHOR_REQUIREMENT_FIELDS,
            Step::Logistics => LOGISTICS_FIELDS,
            Step::AdditionalInfo => ADDITIONAL_INFO_FIELDS,
        }
    }

    pub fn field(self, id: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.id == id)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.number(), Self::COUNT, self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_linear() {
        assert_eq!(Step::FIRST.previous(), None);
        assert_eq!(Step::LAST.next(), None);
        for pair in Step::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }

    #[test]
    fn numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(6), None);
    }

    #[test]
    fn field_ids_are_unique_per_step() {
        for step in Step::ALL {
            let mut ids: Vec<_> = step.fields().iter().map(|field| field.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), step.fields().len(), "{step}");
        }
    }
}
