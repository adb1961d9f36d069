//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// Mirrors `ProblemDetails` by carrying the content type in the body. Mutation
/// endpoints also attach a short human-readable `message`.
///
/// # Example
///
/// ```
/// use campusnav_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct HazardList {
///     hazard_zones: Vec<String>,
/// }
///
/// let response = ServiceResponse::new(HazardList { hazard_zones: vec![] })
///     .with_message("Hazard zones cleared");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Human-readable outcome of a mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            message: None,
            data,
            content_type: "application/json".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct BlockedPaths {
        blocked_paths: Vec<[String; 2]>,
    }

    fn blocked() -> BlockedPaths {
        BlockedPaths {
            blocked_paths: vec![["Computer Lab".to_string(), "Library".to_string()]],
        }
    }

    #[test]
    fn test_response_flattens_payload() {
        let response = ServiceResponse::new(blocked());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json["blocked_paths"],
            serde_json::json!([["Computer Lab", "Library"]])
        );
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_response_with_message() {
        let response =
            ServiceResponse::new(blocked()).with_message("Path blocked between Library and Computer Lab");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json["message"],
            "Path blocked between Library and Computer Lab"
        );
    }

    #[test]
    fn test_response_from_trait() {
        let response: ServiceResponse<BlockedPaths> = blocked().into();
        assert_eq!(response.data, blocked());
        assert_eq!(response.content_type, "application/json");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"message":"ok","blocked_paths":[],"content_type":"application/json"}"#;
        let response: ServiceResponse<BlockedPaths> = serde_json::from_str(json).unwrap();
        assert!(response.data.blocked_paths.is_empty());
        assert_eq!(response.message.as_deref(), Some("ok"));
    }
}
