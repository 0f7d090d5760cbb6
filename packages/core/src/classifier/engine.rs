//! Risk classifier

use crate::classifier::{
    rules::RuleTable,
    types::{ClassificationResult, Measurements},
};

/// Stateless classifier over a fixed rule table.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: RuleTable,
}

impl Classifier {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Classify one set of validated measurements.
    ///
    /// Total over its input: out-of-range readings simply resolve to the
    /// nearest band (there is no upper ceiling and no negative branch).
    pub fn classify(&self, measurements: &Measurements) -> ClassificationResult {
        let category = measurements.category();
        let (risk, message) = self
            .rules
            .rules_for(category)
            .resolve(measurements.driving_reading());

        ClassificationResult {
            category,
            risk,
            message: message.to_string(),
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}

/// Classify against the default rule table.
pub fn classify(measurements: &Measurements) -> ClassificationResult {
    Classifier::default().classify(measurements)
}
