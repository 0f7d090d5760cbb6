//! Alert desk: the single owner of mutable alert state.
//!
//! Ties the classifier, the warning registry and the most recent
//! classification together behind one value. The HTTP layer shares it as
//! `Arc<RwLock<AlertDesk>>`, so every registry mutation happens under a
//! single write lock.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::{ClassificationResult, Classifier};
use crate::coordinator::{AlertCoordinator, AlertView, DashboardView, PredictionView};
use crate::error::ValidationError;
use crate::registry::{Warning, WarningRegistry};
use crate::validation::{PredictionForm, WarningDraft};

/// Response to a prediction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionOutcome {
    pub location: String,
    #[serde(flatten)]
    pub view: PredictionView,
}

#[derive(Debug, Default)]
pub struct AlertDesk {
    classifier: Classifier,
    registry: WarningRegistry,
    latest: Option<ClassificationResult>,
}

impl AlertDesk {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            registry: WarningRegistry::new(),
            latest: None,
        }
    }

    /// Validate a prediction form, classify it and remember the result as
    /// the latest classification.
    pub fn predict(&mut self, form: &PredictionForm) -> Result<PredictionOutcome, ValidationError> {
        let validated = form.validate().map_err(|err| {
            warn!("Rejected prediction request: {}", err);
            err
        })?;

        let result = self.classifier.classify(&validated.measurements);
        let view = AlertCoordinator::present(&result);

        if view.promoted {
            info!(
                "{} risk {} for {}: {}",
                result.category, result.risk, validated.location, result.message
            );
        } else {
            debug!(
                "{} risk {} for {} (not promoted)",
                result.category, result.risk, validated.location
            );
        }

        self.latest = Some(result);

        Ok(PredictionOutcome {
            location: validated.location,
            view,
        })
    }

    /// Validate and issue an operator warning.
    pub fn issue_warning(&mut self, draft: &WarningDraft) -> Result<Warning, ValidationError> {
        let new = draft.validate().map_err(|err| {
            warn!("Rejected warning: {}", err);
            err
        })?;

        let warning =
            self.registry
                .add(&new.message, &new.category, new.severity, &new.location)?;

        info!(
            "Issued warning {} ({} / {}) for {}, {} active",
            warning.id,
            warning.category,
            warning.severity,
            warning.location,
            self.registry.count()
        );
        Ok(warning)
    }

    /// Withdraw a warning. Unknown ids are a no-op returning `false`.
    pub fn withdraw_warning(&mut self, id: i64) -> bool {
        let Some(withdrawn) = self.registry.get(id) else {
            debug!("Withdraw requested for unknown warning {}", id);
            return false;
        };

        let removed = self.registry.remove(id);
        info!(
            "Withdrew warning {} ({} for {}), {} active",
            id,
            withdrawn.category,
            withdrawn.location,
            self.registry.count()
        );
        removed
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.registry.list()
    }

    pub fn active_warning_count(&self) -> usize {
        self.registry.count()
    }

    pub fn latest(&self) -> Option<&ClassificationResult> {
        self.latest.as_ref()
    }

    pub fn alert_view(&self) -> AlertView {
        AlertCoordinator::alert_view(self.latest.as_ref(), &self.registry)
    }

    pub fn dashboard_view(&self) -> DashboardView {
        AlertCoordinator::dashboard_view(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskLevel;
    use crate::validation::FieldValue;

    fn flood_form(rainfall: f64) -> PredictionForm {
        PredictionForm {
            location: Some("Riverside".to_string()),
            disaster_type: Some("flood".to_string()),
            rainfall: Some(FieldValue::Number(rainfall)),
            ..Default::default()
        }
    }

    fn draft(message: &str) -> WarningDraft {
        WarningDraft {
            message: Some(message.to_string()),
            category: Some("Flood".to_string()),
            severity: Some("high".to_string()),
            location: Some("Riverside".to_string()),
        }
    }

    #[test]
    fn predict_records_latest_result() {
        let mut desk = AlertDesk::default();
        let outcome = desk.predict(&flood_form(120.0)).unwrap();

        assert!(outcome.view.promoted);
        assert_eq!(outcome.location, "Riverside");
        assert_eq!(desk.latest().map(|r| r.risk), Some(RiskLevel::High));
    }

    #[test]
    fn rejected_prediction_keeps_previous_latest() {
        let mut desk = AlertDesk::default();
        desk.predict(&flood_form(10.0)).unwrap();

        let mut bad = flood_form(0.0);
        bad.rainfall = None;
        assert!(desk.predict(&bad).is_err());
        assert_eq!(desk.latest().map(|r| r.risk), Some(RiskLevel::None));
    }

    #[test]
    fn low_risk_prediction_is_not_promoted() {
        let mut desk = AlertDesk::default();
        let outcome = desk.predict(&flood_form(30.0)).unwrap();
        assert!(!outcome.view.promoted);
        assert_eq!(outcome.view.headline, "Low Risk Alert");
    }

    #[test]
    fn issue_and_withdraw_warning() {
        let mut desk = AlertDesk::default();
        let warning = desk.issue_warning(&draft("Evacuate now")).unwrap();
        assert_eq!(desk.active_warning_count(), 1);
        assert_eq!(desk.dashboard_view().total, 1);

        assert!(desk.withdraw_warning(warning.id));
        assert!(!desk.withdraw_warning(warning.id));
        assert_eq!(desk.active_warning_count(), 0);
        assert!(desk.alert_view().banner.is_none());
    }

    #[test]
    fn desk_uses_supplied_classifier() {
        let mut desk = AlertDesk::new(Classifier::default());
        let outcome = desk.predict(&flood_form(50.0)).unwrap();
        assert_eq!(outcome.view.result.risk, RiskLevel::Medium);
        assert!(desk.warnings().is_empty());
    }

    #[test]
    fn invalid_warning_is_not_added() {
        let mut desk = AlertDesk::default();
        assert_eq!(
            desk.issue_warning(&draft("")),
            Err(ValidationError::MissingWarningMessage)
        );
        assert!(desk.warnings().is_empty());
    }
}
