use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the campus navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be found in the campus map.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a block/unblock targets two locations that are not connected.
    #[error("no connection between {from} and {to}")]
    UnknownConnection { from: String, to: String },

    /// Raised when every designated exit is unreachable from the start location.
    #[error("no reachable exit from {start}")]
    NoReachableExit { start: String },

    /// Raised when a time-of-day label is not one of morning, afternoon, evening.
    #[error("invalid time of day '{value}'; expected morning, afternoon, or evening")]
    InvalidTimeOfDay { value: String },

    /// Raised when a map document violates a structural invariant.
    #[error("invalid campus map: {message}")]
    InvalidMap { message: String },

    /// Map file could not be located at the resolved path.
    #[error("campus map not found at {path}")]
    MapNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON map parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_map(message: impl Into<String>) -> Self {
        Error::InvalidMap {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_lists_single_suggestion() {
        let err = Error::UnknownLocation {
            name: "Libary".to_string(),
            suggestions: vec!["Library".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown location: Libary. Did you mean 'Library'?"
        );
    }

    #[test]
    fn unknown_location_lists_multiple_suggestions() {
        let err = Error::UnknownLocation {
            name: "Hall".to_string(),
            suggestions: vec!["Lecture Hall".to_string(), "Hostel".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'Lecture Hall', 'Hostel'?"));
    }

    #[test]
    fn unknown_location_without_suggestions() {
        let err = Error::UnknownLocation {
            name: "Moon Base".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown location: Moon Base");
    }
}
