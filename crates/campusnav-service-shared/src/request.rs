//! Request types and validation for HTTP endpoints.
//!
//! Field names follow the JSON bodies the browser front-end sends. String
//! fields default to empty so a missing field is reported by [`Validate`]
//! with a precise message instead of a generic deserialization error.

use serde::{Deserialize, Serialize};

use campusnav_lib::{
    EvacuationRequest as LibEvacuationRequest, RouteRequest as LibRouteRequest, TimeOfDay,
};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require(field: &str, value: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        )));
    }
    Ok(())
}

fn parse_time_of_day(value: &str, request_id: &str) -> Result<TimeOfDay, Box<ProblemDetails>> {
    value.parse::<TimeOfDay>().map_err(|_| {
        Box::new(ProblemDetails::bad_request(
            format!(
                "The 'time_of_day' field must be one of morning, afternoon, evening (got '{}')",
                value
            ),
            request_id,
        ))
    })
}

fn default_time_of_day() -> String {
    TimeOfDay::default().as_str().to_string()
}

fn default_track_steps() -> bool {
    true
}

/// Request for computing the shortest path between two locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(default)]
    pub start: String,

    #[serde(default)]
    pub end: String,

    /// One of morning, afternoon, evening (case-insensitive).
    #[serde(default = "default_time_of_day")]
    pub time_of_day: String,

    /// Price edges by hazard penalties instead of traffic.
    #[serde(default)]
    pub emergency_mode: bool,

    /// Record the algorithm trace in the `steps` field.
    #[serde(default = "default_track_steps")]
    pub track_steps: bool,
}

impl PathRequest {
    /// Build the library request. Call [`Validate::validate`] first.
    pub fn to_route_request(&self, request_id: &str) -> Result<LibRouteRequest, Box<ProblemDetails>> {
        let time = parse_time_of_day(&self.time_of_day, request_id)?;
        Ok(LibRouteRequest::new(self.start.trim(), self.end.trim())
            .at(time)
            .emergency(self.emergency_mode)
            .with_trace(self.track_steps))
    }
}

impl Validate for PathRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("start", &self.start, request_id)?;
        require("end", &self.end, request_id)?;
        parse_time_of_day(&self.time_of_day, request_id)?;
        Ok(())
    }
}

/// Request for the nearest reachable exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestExitRequest {
    #[serde(default)]
    pub start: String,

    #[serde(default = "default_time_of_day")]
    pub time_of_day: String,

    /// Record the algorithm trace for the winning exit.
    #[serde(default)]
    pub track_steps: bool,
}

impl NearestExitRequest {
    /// Build the library request. Call [`Validate::validate`] first.
    pub fn to_evacuation_request(
        &self,
        request_id: &str,
    ) -> Result<LibEvacuationRequest, Box<ProblemDetails>> {
        let time = parse_time_of_day(&self.time_of_day, request_id)?;
        Ok(LibEvacuationRequest::new(self.start.trim())
            .at(time)
            .with_trace(self.track_steps))
    }
}

impl Validate for NearestExitRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("start", &self.start, request_id)?;
        parse_time_of_day(&self.time_of_day, request_id)?;
        Ok(())
    }
}

/// Request naming a connection to block or unblock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRequest {
    #[serde(default)]
    pub node1: String,

    #[serde(default)]
    pub node2: String,
}

impl Validate for EdgeRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("node1", &self.node1, request_id)?;
        require("node2", &self.node2, request_id)
    }
}

/// Request naming a location to flag or clear as a hazard zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardRequest {
    #[serde(default)]
    pub node: String,
}

impl Validate for HazardRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require("node", &self.node, request_id)
    }
}
