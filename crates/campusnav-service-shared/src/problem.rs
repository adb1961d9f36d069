//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use campusnav_lib::Error as LibError;

/// Problem type URI for unknown location names.
pub const PROBLEM_UNKNOWN_LOCATION: &str = "/problems/unknown-location";

/// Problem type URI for a pair of locations without a direct connection.
pub const PROBLEM_UNKNOWN_CONNECTION: &str = "/problems/unknown-connection";

/// Problem type URI for evacuations where every exit is cut off.
pub const PROBLEM_NO_REACHABLE_EXIT: &str = "/problems/no-reachable-exit";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for a service that cannot serve requests (e.g. no map).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use campusnav_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_LOCATION};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_LOCATION,
///     "Unknown Location",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Location 'Libary' not found. Did you mean: Library?")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Extension member: close location names for an unknown location.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            suggestions: Vec::new(),
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for unknown locations.
    pub fn unknown_location(
        name: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Location '{}' not found", name)
        } else {
            format!(
                "Location '{}' not found. Did you mean: {}?",
                name,
                suggestions.join(", ")
            )
        };

        Self::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
        .with_request_id(request_id)
        .with_suggestions(suggestions.to_vec())
    }

    /// Create a 404 Not Found problem for a missing connection.
    pub fn unknown_connection(from: &str, to: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UNKNOWN_CONNECTION,
            "Unknown Connection",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!(
            "There is no direct connection between '{}' and '{}'",
            from, to
        ))
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem when no exit can be reached.
    pub fn no_reachable_exit(start: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_NO_REACHABLE_EXIT,
            "No Reachable Exit",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No exit is reachable from '{}'", start))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownLocation { name, suggestions } => {
            ProblemDetails::unknown_location(name, suggestions, request_id)
        }
        LibError::UnknownConnection { from, to } => {
            ProblemDetails::unknown_connection(from, to, request_id)
        }
        LibError::NoReachableExit { start } => {
            ProblemDetails::no_reachable_exit(start, request_id)
        }
        LibError::InvalidTimeOfDay { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::MapNotFound { path } => ProblemDetails::service_unavailable(
            format!("Campus map not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

/// Convert a JSON body extraction failure into a 400 problem.
///
/// axum answers malformed bodies with 415/422 on its own; the API reports
/// every unusable body as an invalid request instead.
pub fn from_json_rejection(rejection: &JsonRejection, request_id: &str) -> ProblemDetails {
    ProblemDetails::bad_request(rejection.body_text(), request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_UNKNOWN_LOCATION,
            "Unknown Location",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_LOCATION);
        assert_eq!(problem.title, "Unknown Location");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.content_type, "application/problem+json");
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Invalid JSON", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_unknown_location_with_suggestions() {
        let suggestions = vec!["Library".to_string(), "Lecture Hall".to_string()];
        let problem = ProblemDetails::unknown_location("Libary", &suggestions, "req-456");

        assert_eq!(problem.status, 404);
        let detail = problem.detail.as_deref().unwrap();
        assert!(detail.contains("Libary"));
        assert!(detail.contains("Library, Lecture Hall"));
        assert_eq!(problem.suggestions, suggestions);
    }

    #[test]
    fn test_unknown_location_no_suggestions() {
        let problem = ProblemDetails::unknown_location("XYZ", &[], "req-789");

        assert!(problem.detail.as_deref().unwrap().contains("XYZ"));
        assert!(!problem.detail.as_deref().unwrap().contains("Did you mean"));
        let json = serde_json::to_string(&problem).unwrap();
        assert!(!json.contains("suggestions"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_unknown_location() {
        let error = LibError::UnknownLocation {
            name: "Libary".to_string(),
            suggestions: vec!["Library".to_string()],
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_LOCATION);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.suggestions, vec!["Library".to_string()]);
    }

    #[test]
    fn test_from_lib_error_unknown_connection() {
        let error = LibError::UnknownConnection {
            from: "Main Gate".to_string(),
            to: "Hostel".to_string(),
        };
        let problem = from_lib_error(&error, "req-edge");

        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_CONNECTION);
        assert!(problem.detail.as_deref().unwrap().contains("Main Gate"));
        assert!(problem.detail.as_deref().unwrap().contains("Hostel"));
    }

    #[test]
    fn test_from_lib_error_no_reachable_exit() {
        let error = LibError::NoReachableExit {
            start: "Hostel".to_string(),
        };
        let problem = from_lib_error(&error, "req-exit");
        assert_eq!(problem.type_uri, PROBLEM_NO_REACHABLE_EXIT);
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_from_lib_error_invalid_time_is_bad_request() {
        let error = LibError::InvalidTimeOfDay {
            value: "midnight".to_string(),
        };
        let problem = from_lib_error(&error, "req-time");
        assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
        assert!(problem.detail.as_deref().unwrap().contains("midnight"));
    }

    #[test]
    fn test_into_response_sets_status_and_content_type() {
        let response = ProblemDetails::no_reachable_exit("Hostel", "req-1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
