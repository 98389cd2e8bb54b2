use url::Url;

use crate::config::MessagingConfig;
use crate::request::CompositeRequest;
use crate::submission::payload::RequestFields;
use crate::submission::template::{ComposeError, MessageTemplates};

/// Builds `https://<host>/<recipient>?text=<summary>` with the summary
/// percent-encoded. Pure: nothing is sent anywhere.
pub fn build_messaging_link(
    config: &MessagingConfig,
    templates: &MessageTemplates,
    request: &CompositeRequest,
) -> Result<Url, ComposeError> {
    let text = templates.messaging_text(&RequestFields::from_request(request))?;
    let raw = format!(
        "https://{}/{}?text={}",
        config.host.trim_matches('/'),
        urlencoding::encode(config.recipient_id.trim()),
        urlencoding::encode(&text)
    );
    Ok(Url::parse(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ClientInfo, EventInfo};

    #[test]
    fn link_targets_recipient_and_encodes_summary() {
        let templates = MessageTemplates::new().unwrap();
        let request = CompositeRequest {
            client_info: ClientInfo {
                contact_person: "Jane Doe".into(),
                ..Default::default()
            },
            event_info: EventInfo {
                event_name: "Q&A Night".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let link = build_messaging_link(&MessagingConfig::default(), &templates, &request)
            .expect("link");

        assert_eq!(link.scheme(), "https");
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/1234567890");
        let query = link.query().expect("query");
        assert!(query.starts_with("text=Hello%21%20I%27m%20interested"));
        assert!(query.contains("Q%26A%20Night"));

        let text: String = link
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .expect("text parameter");
        assert!(text.contains("• Event: Q&A Night"));
        assert!(text.contains("• Name: Jane Doe"));
    }
}
