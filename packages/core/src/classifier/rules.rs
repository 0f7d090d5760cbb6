//! Threshold rule table
//!
//! Every category owns an ordered list of bands, most severe first. A reading
//! lands in the first band whose threshold it strictly exceeds; readings that
//! exceed none of them land in the category's `none` band.

use serde::Serialize;
use thiserror::Error;

use crate::classifier::types::{DisasterCategory, RiskLevel};

/// Rejected band lists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Band threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),

    #[error("A band cannot carry risk level 'none'; use the fallback message")]
    NoneBand,

    #[error("Bands must be ordered from most to least severe with strictly decreasing thresholds ({previous} then {next})")]
    Unordered { previous: f64, next: f64 },
}

/// One row of a category's rule list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    /// Readings strictly greater than this value fall into the band.
    pub above: f64,
    pub risk: RiskLevel,
    pub message: String,
}

impl Band {
    pub fn new(above: f64, risk: RiskLevel, message: impl Into<String>) -> Self {
        Self { above, risk, message: message.into() }
    }
}

/// Rule list for a single category.
///
/// Built through [`CategoryRules::new`], which checks that the
/// bands run from most to least severe with strictly decreasing thresholds.
/// The first-match lookup in [`resolve`](Self::resolve) relies on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRules {
    bands: Vec<Band>,
    none_message: String,
}

impl CategoryRules {
    pub fn new(bands: Vec<Band>, none_message: impl Into<String>) -> Result<Self, RuleError> {
        for band in &bands {
            if !band.above.is_finite() {
                return Err(RuleError::NonFiniteThreshold(band.above));
            }
            if band.risk == RiskLevel::None {
                return Err(RuleError::NoneBand);
            }
        }

        for pair in bands.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if previous.above <= next.above || previous.risk <= next.risk {
                return Err(RuleError::Unordered {
                    previous: previous.above,
                    next: next.above,
                });
            }
        }

        Ok(Self {
            bands,
            none_message: none_message.into(),
        })
    }

    /// Three-band list used by the built-in table. Inputs are constants that
    /// already satisfy the ordering checked by [`new`](Self::new).
    fn standard(thresholds: [f64; 3], messages: [&str; 4]) -> Self {
        let [high, medium, low] = thresholds;
        let [high_msg, medium_msg, low_msg, none_msg] = messages;
        Self {
            bands: vec![
                Band::new(high, RiskLevel::High, high_msg),
                Band::new(medium, RiskLevel::Medium, medium_msg),
                Band::new(low, RiskLevel::Low, low_msg),
            ],
            none_message: none_msg.to_string(),
        }
    }

    /// Bands, most severe first.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Advisory used when no band matches.
    pub fn none_message(&self) -> &str {
        &self.none_message
    }

    /// Resolve a reading to its risk band and advisory.
    ///
    /// NaN compares false against every threshold and therefore resolves to
    /// `none`; the validation boundary rejects it before it gets here.
    pub fn resolve(&self, reading: f64) -> (RiskLevel, &str) {
        self.bands
            .iter()
            .find(|band| reading > band.above)
            .map(|band| (band.risk, band.message.as_str()))
            .unwrap_or((RiskLevel::None, self.none_message.as_str()))
    }
}

/// Complete rule table, one `CategoryRules` per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    pub flood: CategoryRules,
    pub earthquake: CategoryRules,
    pub storm: CategoryRules,
    pub tsunami: CategoryRules,
}

impl RuleTable {
    pub fn rules_for(&self, category: DisasterCategory) -> &CategoryRules {
        match category {
            DisasterCategory::Flood => &self.flood,
            DisasterCategory::Earthquake => &self.earthquake,
            DisasterCategory::Storm => &self.storm,
            DisasterCategory::Tsunami => &self.tsunami,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            // rainfall, mm
            flood: CategoryRules::standard(
                [100.0, 50.0, 20.0],
                [
                    "Heavy rainfall detected. High risk of flooding in low-lying areas.",
                    "Moderate rainfall detected. Some risk of localized flooding.",
                    "Light rainfall detected. Low risk of flooding.",
                    "Minimal rainfall detected. No significant flood risk.",
                ],
            ),
            earthquake: CategoryRules::standard(
                [6.0, 4.0, 2.0],
                [
                    "High seismic activity detected. Significant earthquake risk.",
                    "Moderate seismic activity detected. Be prepared for possible earthquakes.",
                    "Low seismic activity detected. Minor earthquake risk.",
                    "Minimal seismic activity. No significant earthquake risk.",
                ],
            ),
            // wind speed, km/h
            storm: CategoryRules::standard(
                [100.0, 60.0, 30.0],
                [
                    "Extremely high wind speeds detected. Severe storm risk.",
                    "High wind speeds detected. Moderate storm risk.",
                    "Moderate wind speeds detected. Low storm risk.",
                    "Low wind speeds. No significant storm risk.",
                ],
            ),
            tsunami: CategoryRules::standard(
                [7.0, 5.0, 3.0],
                [
                    "Major seismic activity detected in ocean region. High tsunami risk for coastal areas.",
                    "Moderate seismic activity detected in ocean region. Some tsunami risk for coastal areas.",
                    "Low seismic activity detected. Minor tsunami risk.",
                    "Minimal seismic activity. No significant tsunami risk.",
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(above: f64, risk: RiskLevel) -> Band {
        Band::new(above, risk, format!("{} above {}", risk, above))
    }

    #[test]
    fn default_table_passes_its_own_checks() {
        let table = RuleTable::default();
        for category in DisasterCategory::ALL {
            let rules = table.rules_for(category);
            assert!(
                CategoryRules::new(rules.bands().to_vec(), rules.none_message()).is_ok(),
                "{category}"
            );
        }
    }

    #[test]
    fn new_accepts_ordered_bands() {
        let rules = CategoryRules::new(
            vec![band(80.0, RiskLevel::High), band(40.0, RiskLevel::Low)],
            "calm",
        )
        .unwrap();
        assert_eq!(rules.resolve(90.0).0, RiskLevel::High);
        assert_eq!(rules.resolve(50.0).0, RiskLevel::Low);
        assert_eq!(rules.resolve(40.0), (RiskLevel::None, "calm"));
    }

    #[test]
    fn new_rejects_ascending_thresholds() {
        let err = CategoryRules::new(
            vec![band(20.0, RiskLevel::High), band(100.0, RiskLevel::Medium)],
            "calm",
        )
        .unwrap_err();
        assert_eq!(err, RuleError::Unordered { previous: 20.0, next: 100.0 });
    }

    #[test]
    fn new_rejects_risk_out_of_order() {
        let err = CategoryRules::new(
            vec![band(100.0, RiskLevel::Low), band(50.0, RiskLevel::High)],
            "calm",
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::Unordered { .. }));
    }

    #[test]
    fn new_rejects_equal_thresholds() {
        let result = CategoryRules::new(
            vec![band(50.0, RiskLevel::High), band(50.0, RiskLevel::Medium)],
            "calm",
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_none_band_and_nan_threshold() {
        assert_eq!(
            CategoryRules::new(vec![band(10.0, RiskLevel::None)], "calm"),
            Err(RuleError::NoneBand)
        );
        assert!(matches!(
            CategoryRules::new(vec![band(f64::NAN, RiskLevel::High)], "calm"),
            Err(RuleError::NonFiniteThreshold(_))
        ));
    }
}
