use serde::Serialize;

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_is_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::new("Missing search query")).unwrap();
        assert_eq!(body, json!({ "error": "Missing search query" }));
    }

    #[test]
    fn detail_is_rendered_when_present() {
        let body = serde_json::to_value(ErrorResponse::with_detail(
            "Spoonacular request failed",
            "upstream request timed out",
        ))
        .unwrap();
        assert_eq!(body["error"], "Spoonacular request failed");
        assert_eq!(body["detail"], "upstream request timed out");
    }
}
