use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// Typed view over a token endpoint response.
///
/// Every field is optional so error objects still parse; unknown keys land in `extra`.
/// A known field with an unexpected JSON type reads as `None` instead of failing the parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TokenResponse {
    /// Returns `None` when the text is not a JSON object.
    pub fn parse(json_text: &str) -> Option<Self> {
        serde_json::from_str(json_text).ok()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|token| !token.is_empty())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::TokenResponse;

    #[test]
    fn parse_keeps_unknown_fields() {
        let response = TokenResponse::parse(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"session_id":"s"}"#,
        )
        .unwrap();
        assert_eq!(response.access_token.as_deref(), Some("a"));
        assert_eq!(response.refresh_token(), Some("r"));
        assert_eq!(response.expires_in, Some(3600));
        assert_eq!(
            response.extra.get("session_id"),
            Some(&serde_json::json!("s"))
        );
    }

    #[test]
    fn parse_accepts_error_objects() {
        let response =
            TokenResponse::parse(r#"{"error":"invalid_grant","error_description":"expired"}"#)
                .unwrap();
        assert!(response.access_token.is_none());
        assert_eq!(
            response.extra.get("error"),
            Some(&serde_json::json!("invalid_grant"))
        );
    }

    #[test]
    fn mistyped_known_fields_do_not_fail_the_parse() {
        let response = TokenResponse::parse(
            r#"{"access_token":"a","refresh_token":"fresh","expires_in":"3600","scope":["vms.all"]}"#,
        )
        .unwrap();
        assert_eq!(response.refresh_token(), Some("fresh"));
        assert_eq!(response.expires_in, None);
        assert_eq!(response.scope, None);
    }

    #[test]
    fn non_string_access_token_still_parses() {
        let response = TokenResponse::parse(r#"{"access_token":42,"expires_in":1.5}"#).unwrap();
        assert_eq!(response.access_token, None);
        assert_eq!(response.expires_in, None);
    }

    #[test]
    fn empty_refresh_token_is_ignored() {
        let response = TokenResponse::parse(r#"{"access_token":"a","refresh_token":""}"#).unwrap();
        assert_eq!(response.refresh_token(), None);
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert!(TokenResponse::parse("[1,2]").is_none());
        assert!(TokenResponse::parse("not json").is_none());
    }
}
