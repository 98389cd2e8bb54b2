use schemars::schema_for;
use serde_json::Value;

use crate::request::CompositeRequest;

/// JSON schema of a serialized [`CompositeRequest`].
pub fn request_schema() -> Value {
    schema_for!(CompositeRequest).to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_every_section() {
        let schema = request_schema();
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("object schema");
        for key in [
            "clientInfo",
            "eventInfo",
            "anchorRequirements",
            "logistics",
            "additionalInfo",
        ] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }
}
