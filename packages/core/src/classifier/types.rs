//! Core data types for risk classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Risk band produced by the classifier, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four disaster categories the rule table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterCategory {
    Flood,
    Earthquake,
    Storm,
    Tsunami,
}

impl DisasterCategory {
    pub const ALL: [DisasterCategory; 4] = [
        DisasterCategory::Flood,
        DisasterCategory::Earthquake,
        DisasterCategory::Storm,
        DisasterCategory::Tsunami,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterCategory::Flood => "flood",
            DisasterCategory::Earthquake => "earthquake",
            DisasterCategory::Storm => "storm",
            DisasterCategory::Tsunami => "tsunami",
        }
    }
}

impl fmt::Display for DisasterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisasterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flood" => Ok(DisasterCategory::Flood),
            "earthquake" => Ok(DisasterCategory::Earthquake),
            "storm" => Ok(DisasterCategory::Storm),
            "tsunami" => Ok(DisasterCategory::Tsunami),
            _ => Err(format!("Unknown disaster type '{}'", s.trim())),
        }
    }
}

/// Validated readings for one classification request.
///
/// Each variant carries exactly the fields its category requires. Fields
/// the rule table does not consult (`river_level`, `temperature`) are still
/// accepted and carried so callers can echo them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Measurements {
    Flood {
        /// Rainfall in millimetres.
        rainfall: f64,
        /// River level in metres. Not used by the thresholds.
        river_level: Option<f64>,
    },
    Earthquake {
        seismic_activity: f64,
    },
    Storm {
        /// Wind speed in km/h.
        wind_speed: f64,
        /// Temperature in °C. Required, but not used by the thresholds.
        temperature: f64,
    },
    Tsunami {
        seismic_activity: f64,
    },
}

impl Measurements {
    pub fn category(&self) -> DisasterCategory {
        match self {
            Measurements::Flood { .. } => DisasterCategory::Flood,
            Measurements::Earthquake { .. } => DisasterCategory::Earthquake,
            Measurements::Storm { .. } => DisasterCategory::Storm,
            Measurements::Tsunami { .. } => DisasterCategory::Tsunami,
        }
    }

    /// The single reading the thresholds are compared against.
    pub fn driving_reading(&self) -> f64 {
        match *self {
            Measurements::Flood { rainfall, .. } => rainfall,
            Measurements::Earthquake { seismic_activity } => seismic_activity,
            Measurements::Storm { wind_speed, .. } => wind_speed,
            Measurements::Tsunami { seismic_activity } => seismic_activity,
        }
    }
}

/// Outcome of classifying one set of measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: DisasterCategory,
    pub risk: RiskLevel,
    pub message: String,
}
