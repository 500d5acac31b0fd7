use serde::Deserialize;

/// Error body shape for non-2xx vendor responses:
/// `{"errors":[{"message":"...","code":...}]}`. Codes arrive as either
/// strings or numbers depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEntry {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorEntry {
    pub fn code_string(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(code)) => Some(code.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_codes() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"errors":[{"message":"Shop not found","code":8101}]}"#,
        )
        .unwrap();
        assert_eq!(body.errors[0].code_string().as_deref(), Some("8101"));

        let body: ApiErrorBody = serde_json::from_str(
            r#"{"errors":[{"message":"Bad token","code":"invalid_token"}]}"#,
        )
        .unwrap();
        assert_eq!(body.errors[0].code_string().as_deref(), Some("invalid_token"));
    }

    #[test]
    fn tolerates_unexpected_shapes() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert!(body.errors.is_empty());
    }
}
