use thiserror::Error;

use crate::classifier::DisasterCategory;

/// Unified application error.
///
/// Startup failures only. Request-level validation problems are reported
/// to the caller as [`ValidationError`] and never abort the service.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A required input was missing, blank or malformed at the boundary.
///
/// The `Display` text is user-facing and is returned verbatim by the API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a location")]
    MissingLocation,

    #[error("Please select a disaster type")]
    MissingDisasterType,

    #[error("Unknown disaster type '{0}'")]
    UnknownDisasterType(String),

    #[error("{}", missing_readings_message(.0))]
    MissingReadings(DisasterCategory),

    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("Warning message is required")]
    MissingWarningMessage,

    #[error("Warning type is required")]
    MissingWarningCategory,

    #[error("Location is required")]
    MissingWarningLocation,

    #[error("Invalid severity '{0}'. Must be one of: low, medium, high")]
    InvalidSeverity(String),
}

fn missing_readings_message(category: &DisasterCategory) -> &'static str {
    match category {
        DisasterCategory::Flood => "Rainfall data is required for flood prediction",
        DisasterCategory::Earthquake => {
            "Seismic activity data is required for earthquake prediction"
        }
        DisasterCategory::Storm => "Wind speed and temperature are required for storm prediction",
        DisasterCategory::Tsunami => "Seismic activity data is required for tsunami prediction",
    }
}
