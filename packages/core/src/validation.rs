//! Input validation boundary.
//!
//! Raw submissions (as typed into a form or posted as JSON) are checked here
//! before anything reaches the classifier or the warning registry. Every
//! failure maps to a [`ValidationError`] whose text is shown to the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::{DisasterCategory, Measurements};
use crate::error::ValidationError;
use crate::registry::Severity;

/// A submitted field value. Forms send text, API clients usually send numbers.
/// Any other JSON value (`true`, arrays, objects) lands in `Other` and is
/// rejected as non-numeric during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Prediction request exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionForm {
    pub location: Option<String>,
    pub disaster_type: Option<String>,
    pub rainfall: Option<FieldValue>,
    pub river_level: Option<FieldValue>,
    pub seismic_activity: Option<FieldValue>,
    pub wind_speed: Option<FieldValue>,
    pub temperature: Option<FieldValue>,
}

/// A prediction request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPrediction {
    pub location: String,
    pub measurements: Measurements,
}

impl PredictionForm {
    pub fn validate(&self) -> Result<ValidatedPrediction, ValidationError> {
        let location = non_blank(self.location.as_deref()).ok_or(ValidationError::MissingLocation)?;

        let category: DisasterCategory = non_blank(self.disaster_type.as_deref())
            .ok_or(ValidationError::MissingDisasterType)?
            .parse()
            .map_err(|_| {
                ValidationError::UnknownDisasterType(
                    self.disaster_type.as_deref().unwrap_or_default().trim().to_string(),
                )
            })?;

        let missing = || ValidationError::MissingReadings(category);

        let measurements = match category {
            DisasterCategory::Flood => {
                let rainfall = require(&self.rainfall, "Rainfall").ok_or_else(missing)?;
                Measurements::Flood {
                    rainfall: rainfall?,
                    river_level: optional(&self.river_level, "River level")?,
                }
            }
            DisasterCategory::Earthquake => {
                let seismic = require(&self.seismic_activity, "Seismic activity").ok_or_else(missing)?;
                Measurements::Earthquake { seismic_activity: seismic? }
            }
            DisasterCategory::Storm => {
                let wind_speed = require(&self.wind_speed, "Wind speed");
                let temperature = require(&self.temperature, "Temperature");
                match (wind_speed, temperature) {
                    (Some(wind_speed), Some(temperature)) => Measurements::Storm {
                        wind_speed: wind_speed?,
                        temperature: temperature?,
                    },
                    _ => return Err(missing()),
                }
            }
            DisasterCategory::Tsunami => {
                let seismic = require(&self.seismic_activity, "Seismic activity").ok_or_else(missing)?;
                Measurements::Tsunami { seismic_activity: seismic? }
            }
        };

        Ok(ValidatedPrediction { location, measurements })
    }
}

/// Operator-authored warning exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarningDraft {
    pub message: Option<String>,
    /// Free-text category label, e.g. "Flood" or "Wildfire".
    #[serde(alias = "type")]
    pub category: Option<String>,
    pub severity: Option<String>,
    pub location: Option<String>,
}

/// A warning draft that passed validation, ready for the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarning {
    pub message: String,
    pub category: String,
    pub severity: Severity,
    pub location: String,
}

impl WarningDraft {
    pub fn validate(&self) -> Result<NewWarning, ValidationError> {
        let message =
            non_blank(self.message.as_deref()).ok_or(ValidationError::MissingWarningMessage)?;
        let location =
            non_blank(self.location.as_deref()).ok_or(ValidationError::MissingWarningLocation)?;
        let category =
            non_blank(self.category.as_deref()).ok_or(ValidationError::MissingWarningCategory)?;

        let raw_severity = self.severity.as_deref().unwrap_or_default();
        let severity = raw_severity
            .parse::<Severity>()
            .map_err(|_| ValidationError::InvalidSeverity(raw_severity.trim().to_string()))?;

        Ok(NewWarning { message, category, severity, location })
    }
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_blank(value: &Option<FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(text)) => text.trim().is_empty(),
        Some(FieldValue::Number(_)) | Some(FieldValue::Other(_)) => false,
    }
}

fn parse_number(value: &FieldValue, field: &'static str) -> Result<f64, ValidationError> {
    let number = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NotANumber { field })?,
        FieldValue::Other(_) => return Err(ValidationError::NotANumber { field }),
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(ValidationError::NotANumber { field })
    }
}

/// `None` when the field is missing; otherwise the parse result.
fn require(value: &Option<FieldValue>, field: &'static str) -> Option<Result<f64, ValidationError>> {
    if is_blank(value) {
        return None;
    }
    value.as_ref().map(|v| parse_number(v, field))
}

fn optional(value: &Option<FieldValue>, field: &'static str) -> Result<Option<f64>, ValidationError> {
    require(value, field).transpose()
}
