use serde_json::{Map, Value};

/// Key whose presence marks a successful token response.
const ACCESS_TOKEN_KEY: &str = "access_token";

/// Presence check only: true iff `json_text` is a JSON object with an `access_token` key.
///
/// The value is not inspected, so `{"access_token": null}` still counts as valid.
pub fn is_valid(json_text: &str) -> bool {
    match serde_json::from_str::<Map<String, Value>>(json_text) {
        Ok(object) => object.contains_key(ACCESS_TOKEN_KEY),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid;

    #[test]
    fn accepts_object_with_access_token() {
        assert!(is_valid(r#"{"access_token":"abc","refresh_token":"def"}"#));
    }

    #[test]
    fn ignores_access_token_value_type() {
        assert!(is_valid(r#"{"access_token":null}"#));
        assert!(is_valid(r#"{"access_token":42}"#));
        assert!(is_valid(r#"{"access_token":{"nested":true}}"#));
    }

    #[test]
    fn rejects_unparseable_input() {
        assert!(!is_valid(""));
        assert!(!is_valid("<html>bad gateway</html>"));
        assert!(!is_valid(r#"{"access_token":"#));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(!is_valid("null"));
        assert!(!is_valid(r#"["access_token"]"#));
        assert!(!is_valid(r#""access_token""#));
    }

    #[test]
    fn rejects_object_without_access_token() {
        assert!(!is_valid("{}"));
        assert!(!is_valid(r#"{"error":"invalid_grant"}"#));
        assert!(!is_valid(r#"{"Access_Token":"abc"}"#));
        assert!(!is_valid(r#"{"data":{"access_token":"abc"}}"#));
    }
}
