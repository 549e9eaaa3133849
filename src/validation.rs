use serde_json::Value;

use crate::error::ApiError;

/// Check that every required field is present and non-empty in a callable
/// payload.
///
/// A field is missing when it is absent, `null`, or a string that is empty
/// after trimming. All missing fields are reported, in the order of the
/// `required` list, so identical input always yields an identical message.
pub fn validate_required_fields(payload: &Value, required: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| is_missing(payload.get(*name)))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ApiError::invalid_input(format!(
        "Missing required fields: {}",
        missing.join(", ")
    )))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Extract a required string field. Call after `validate_required_fields`,
/// which guarantees presence; a non-string value is still an input error.
pub fn require_str<'a>(payload: &'a Value, name: &str) -> Result<&'a str, ApiError> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::invalid_input(format!("Field '{}' must be a string", name)))
}

/// Extract an optional string field; `null` and absence are equivalent.
pub fn optional_str<'a>(payload: &'a Value, name: &str) -> Result<Option<&'a str>, ApiError> {
    match payload.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ApiError::invalid_input(format!(
            "Field '{}' must be a string",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_complete_payload() {
        let payload = json!({ "workspaceToken": "t", "content": "hello" });
        assert!(validate_required_fields(&payload, &["workspaceToken", "content"]).is_ok());
    }

    #[test]
    fn reports_all_missing_fields_in_required_order() {
        let payload = json!({ "content": "hello" });
        let err = validate_required_fields(
            &payload,
            &["workspaceToken", "text_id", "content", "author"],
        )
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(
            err.message(),
            "Missing required fields: workspaceToken, text_id, author"
        );
    }

    #[test]
    fn blank_and_null_strings_count_as_missing() {
        let payload = json!({ "workspaceToken": "   ", "content": null });
        let err = validate_required_fields(&payload, &["workspaceToken", "content"]).unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required fields: workspaceToken, content"
        );
    }

    #[test]
    fn optional_str_distinguishes_absent_from_wrong_type() {
        let payload = json!({ "title": 7 });
        assert!(optional_str(&payload, "missing").unwrap().is_none());
        assert!(optional_str(&payload, "title").is_err());
    }
}
