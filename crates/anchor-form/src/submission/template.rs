use handlebars::{Handlebars, handlebars_helper, no_escape};
use serde::Serialize;
use thiserror::Error;

use crate::submission::payload::RequestFields;

const RELAY_MESSAGE: &str = "relay_message";
const MESSAGING_TEXT: &str = "messaging_text";

const RELAY_MESSAGE_TEMPLATE: &str = "\
═══════════════════════════════════════
NEW ANCHOR SERVICE REQUEST
═══════════════════════════════════════

📋 CLIENT INFORMATION
───────────────────────────────────────
Company Name: {{company_name}}
Contact Person: {{contact_person}}
Email: {{client_email}}
Phone: {{client_phone}}

🎯 EVENT INFORMATION
───────────────────────────────────────
Event Name: {{event_name}}
Event Type: {{event_type}}
Description: {{event_description}}

🎤 ANCHOR REQUIREMENTS
───────────────────────────────────────
Anchor Style: {{or_default anchor_style \"Not specified\"}}
Language: {{or_default language \"Not specified\"}}
Additional Requirements: {{or_default additional_requirements \"None\"}}

📅 LOGISTICS
───────────────────────────────────────
Event Date: {{event_date}}
Event Time: {{event_time}}
Duration: {{duration}}
Location: {{location}}

💰 ADDITIONAL INFORMATION
───────────────────────────────────────
Budget: {{or_default budget \"Not specified\"}}
Special Requests: {{or_default special_requests \"None\"}}
Notes: {{or_default notes \"None\"}}

═══════════════════════════════════════
Submitted on: {{submitted_at}}
═══════════════════════════════════════";

const MESSAGING_TEXT_TEMPLATE: &str = "\
Hello! I'm interested in your anchor services.

*Event Details:*
• Event: {{event_name}}
• Type: {{event_type}}
• Date: {{event_date}}
• Time: {{event_time}}
• Location: {{location}}

*My Information:*
• Name: {{contact_person}}
• Company: {{company_name}}
• Email: {{client_email}}
• Phone: {{client_phone}}

*Requirements:*
• Style: {{anchor_style}}
• Language: {{or_default language \"Not specified\"}}

{{#if budget}}Budget: {{budget}}{{/if}}

Please let me know if you're available and we can discuss further details.";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("invalid message template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("failed to render message: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("messaging link is not a valid URL: {0}")]
    Link(#[from] url::ParseError),
}

handlebars_helper!(or_default: |value: str, fallback: str| {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
});

/// Registers the helpers shared by the message templates.
pub fn register_default_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("or_default", Box::new(or_default));
}

#[derive(Serialize)]
struct RelayMessageContext<'a> {
    #[serde(flatten)]
    fields: &'a RequestFields,
    submitted_at: &'a str,
}

/// Compiled templates for the relay message body and the messaging summary.
pub struct MessageTemplates {
    registry: Handlebars<'static>,
}

impl MessageTemplates {
    pub fn new() -> Result<Self, ComposeError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        register_default_helpers(&mut registry);
        registry.register_template_string(RELAY_MESSAGE, RELAY_MESSAGE_TEMPLATE)?;
        registry.register_template_string(MESSAGING_TEXT, MESSAGING_TEXT_TEMPLATE)?;
        Ok(Self { registry })
    }

    /// Human-readable body sent to the relay inbox.
    pub fn relay_message(
        &self,
        fields: &RequestFields,
        submitted_at: &str,
    ) -> Result<String, ComposeError> {
        let context = RelayMessageContext {
            fields,
            submitted_at,
        };
        Ok(self.registry.render(RELAY_MESSAGE, &context)?)
    }

    /// Plain summary prefilled into the messaging app.
    pub fn messaging_text(&self, fields: &RequestFields) -> Result<String, ComposeError> {
        Ok(self.registry.render(MESSAGING_TEXT, fields)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> RequestFields {
        RequestFields {
            company_name: "Acme".into(),
            contact_person: "Jane Doe".into(),
            client_email: "jane@acme.com".into(),
            event_name: "Launch Night".into(),
            anchor_style: "Energetic/Enthusiastic".into(),
            ..Default::default()
        }
    }

    #[test]
    fn relay_message_applies_placeholders() {
        let templates = MessageTemplates::new().expect("templates compile");
        let message = templates
            .relay_message(&fields(), "2026-01-02 10:00:00 UTC")
            .expect("render");
        assert!(message.contains("Company Name: Acme\n"));
        assert!(message.contains("Anchor Style: Energetic/Enthusiastic\n"));
        assert!(message.contains("Language: Not specified\n"));
        assert!(message.contains("Notes: None\n"));
        assert!(message.contains("Submitted on: 2026-01-02 10:00:00 UTC"));
    }

    #[test]
    fn messaging_text_keeps_markup_unescaped() {
        let templates = MessageTemplates::new().expect("templates compile");
        let mut fields = fields();
        fields.company_name = "Smith & Sons".into();
        let text = templates.messaging_text(&fields).expect("render");
        assert!(text.starts_with("Hello! I'm interested in your anchor services."));
        assert!(text.contains("• Company: Smith & Sons"));
        assert!(!text.contains("Budget:"));

        fields.budget = "To be discussed".into();
        let text = templates.messaging_text(&fields).expect("render");
        assert!(text.contains("\nBudget: To be discussed\n"));
    }
}
