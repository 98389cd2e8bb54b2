use serde::Serialize;
use url::Url;

use crate::request::CompositeRequest;

pub const HEADLINE: &str = "Form Submitted Successfully! 🎉";
pub const THANK_YOU: &str =
    "Thank you for your interest! We have received your request and will get back to you soon.";

/// Success screen shown once the relay accepted the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub headline: &'static str,
    pub message: &'static str,
    pub confirmation_email: String,
    pub event_name: String,
    pub event_date: String,
    pub location: String,
    /// Absent when the link could not be composed; display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_link: Option<Url>,
}

impl ResultView {
    pub fn new(request: &CompositeRequest, messaging_link: Option<Url>) -> Self {
        Self {
            headline: HEADLINE,
            message: THANK_YOU,
            confirmation_email: request.client_info.email.clone(),
            event_name: request.event_info.event_name.clone(),
            event_date: request.logistics.event_date.clone(),
            location: request.logistics.location.clone(),
            messaging_link,
        }
    }

    pub fn render_text(&self) -> String {
        let mut lines = vec![
            self.headline.to_string(),
            self.message.to_string(),
            format!(
                "A confirmation email has been sent to {}",
                self.confirmation_email
            ),
            String::new(),
            "Request Summary".to_string(),
            format!("  Event: {}", self.event_name),
            format!("  Date: {}", self.event_date),
            format!("  Location: {}", self.location),
        ];
        if let Some(link) = &self.messaging_link {
            lines.push(String::new());
            lines.push(format!("Message us: {link}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ClientInfo, EventInfo, Logistics};

    #[test]
    fn summary_lists_event_date_and_location() {
        let request = CompositeRequest {
            client_info: ClientInfo {
                email: "jane@acme.com".into(),
                ..Default::default()
            },
            event_info: EventInfo {
                event_name: "Launch Night".into(),
                ..Default::default()
            },
            logistics: Logistics {
                event_date: "2026-12-01".into(),
                location: "Mumbai".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let link = Url::parse("https://wa.me/1234567890?text=hi").unwrap();
        let text = ResultView::new(&request, Some(link)).render_text();

        assert!(text.starts_with(HEADLINE));
        assert!(text.contains("A confirmation email has been sent to jane@acme.com"));
        assert!(text.contains("  Event: Launch Night\n  Date: 2026-12-01\n  Location: Mumbai"));
        assert!(text.ends_with("Message us: https://wa.me/1234567890?text=hi"));
    }

    #[test]
    fn summary_without_link_ends_at_location() {
        let text = ResultView::new(&CompositeRequest::default(), None).render_text();
        assert!(!text.contains("Message us"));
        assert!(text.ends_with("  Location: "));
    }
}
