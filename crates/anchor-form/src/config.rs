use thiserror::Error;
use url::Url;

pub const RELAY_ENDPOINT_ENV: &str = "ANCHOR_RELAY_ENDPOINT";
pub const MESSAGING_HOST_ENV: &str = "ANCHOR_MESSAGING_HOST";
pub const MESSAGING_RECIPIENT_ENV: &str = "ANCHOR_MESSAGING_RECIPIENT";

pub const DEFAULT_MESSAGING_HOST: &str = "wa.me";
pub const DEFAULT_MESSAGING_RECIPIENT: &str = "1234567890";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("relay endpoint '{value}' is not a valid URL")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("messaging {field} must not be empty")]
    EmptyMessagingField { field: &'static str },
    #[error("messaging host '{value}' {reason}")]
    InvalidMessagingHost { value: String, reason: String },
}

/// Where the messaging deep link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    pub host: String,
    pub recipient_id: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MESSAGING_HOST.to_string(),
            recipient_id: DEFAULT_MESSAGING_RECIPIENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormConfig {
    /// Missing endpoints are reported when a submission is attempted.
    pub relay_endpoint: Option<Url>,
    pub messaging: MessagingConfig,
}

impl FormConfig {
    /// Builds the configuration from raw values; blank values count as unset.
    pub fn from_parts(
        relay_endpoint: Option<&str>,
        messaging_host: Option<&str>,
        messaging_recipient: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let relay_endpoint = match non_blank(relay_endpoint) {
            Some(value) => Some(Url::parse(value).map_err(|source| {
                ConfigError::InvalidEndpoint {
                    value: value.to_string(),
                    source,
                }
            })?),
            None => None,
        };
        let messaging = MessagingConfig {
            host: parse_messaging_host(
                non_blank(messaging_host).unwrap_or(DEFAULT_MESSAGING_HOST),
            )?,
            recipient_id: non_blank(messaging_recipient)
                .unwrap_or(DEFAULT_MESSAGING_RECIPIENT)
                .to_string(),
        };
        Ok(Self {
            relay_endpoint,
            messaging,
        })
    }

    /// Reads `ANCHOR_RELAY_ENDPOINT`, `ANCHOR_MESSAGING_HOST` and
    /// `ANCHOR_MESSAGING_RECIPIENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = std::env::var(RELAY_ENDPOINT_ENV).ok();
        let host = std::env::var(MESSAGING_HOST_ENV).ok();
        let recipient = std::env::var(MESSAGING_RECIPIENT_ENV).ok();
        Self::from_parts(endpoint.as_deref(), host.as_deref(), recipient.as_deref())
    }

    pub fn with_relay_endpoint(mut self, endpoint: Url) -> Self {
        self.relay_endpoint = Some(endpoint);
        self
    }

    pub fn with_messaging(mut self, messaging: MessagingConfig) -> Result<Self, ConfigError> {
        if messaging.host.trim().is_empty() {
            return Err(ConfigError::EmptyMessagingField { field: "host" });
        }
        if messaging.recipient_id.trim().is_empty() {
            return Err(ConfigError::EmptyMessagingField {
                field: "recipient id",
            });
        }
        parse_messaging_host(messaging.host.trim())?;
        self.messaging = messaging;
        Ok(self)
    }
}

/// Accepts a bare host (optionally with a port) that forms a valid
/// `https://<host>/` link base.
fn parse_messaging_host(value: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidMessagingHost {
        value: value.to_string(),
        reason,
    };
    if value.contains("://") {
        return Err(invalid("must not include a scheme".into()));
    }
    if value.contains(['/', '?', '#', '@']) {
        return Err(invalid("must not include a path, query or credentials".into()));
    }
    let base = Url::parse(&format!("https://{value}/"))
        .map_err(|err| invalid(format!("is not a valid host: {err}")))?;
    if base.host_str().is_none() || base.path() != "/" {
        return Err(invalid("is not a bare host".into()));
    }
    Ok(value.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = FormConfig::from_parts(Some("  "), None, Some("")).unwrap();
        assert!(config.relay_endpoint.is_none());
        assert_eq!(config.messaging, MessagingConfig::default());
    }

    #[test]
    fn endpoint_must_parse() {
        let err = FormConfig::from_parts(Some("not a url"), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        let config =
            FormConfig::from_parts(Some("https://relay.example/f/abc"), Some("chat.example"), None)
                .unwrap();
        assert_eq!(
            config.relay_endpoint.as_ref().map(Url::as_str),
            Some("https://relay.example/f/abc")
        );
        assert_eq!(config.messaging.host, "chat.example");
    }

    #[test]
    fn messaging_host_must_be_bare() {
        for host in ["https://wa.me", "chat host", "wa.me/send", "wa.me?x=1"] {
            let err = FormConfig::from_parts(None, Some(host), None).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidMessagingHost { value, .. } if value == host),
                "{host}: {err}"
            );
        }
        let config = FormConfig::from_parts(None, Some(" chat.example:8443 "), None).unwrap();
        assert_eq!(config.messaging.host, "chat.example:8443");
    }

    #[test]
    fn messaging_override_rejects_empty_recipient() {
        let err = FormConfig::default()
            .with_messaging(MessagingConfig {
                host: "wa.me".into(),
                recipient_id: " ".into(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyMessagingField {
                field: "recipient id"
            }
        ));
    }
}
