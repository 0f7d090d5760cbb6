//! Alert coordination.
//!
//! Decides when a classification escalates to an alert and assembles the
//! views handed to the presentation layer. The coordinator keeps no state of
//! its own: everything it reports is derived from the registry snapshot and
//! the latest classification passed in.

use serde::Serialize;

use crate::classifier::{ClassificationResult, RiskLevel};
use crate::registry::{Warning, WarningRegistry};

/// Number of warnings shown in the dashboard preview.
pub const DASHBOARD_PREVIEW_LEN: usize = 2;

/// "Active warnings" indicator. Only exists while the registry is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveWarningsBanner {
    pub count: usize,
}

/// A classification as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionView {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub headline: &'static str,
    pub promoted: bool,
}

/// Everything the alert page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub prediction: Option<PredictionView>,
    pub warnings: Vec<Warning>,
    pub banner: Option<ActiveWarningsBanner>,
}

/// Summary shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub banner: Option<ActiveWarningsBanner>,
    pub preview: Vec<Warning>,
    pub total: usize,
}

/// Stateless alerting policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertCoordinator;

impl AlertCoordinator {
    /// Medium-or-above escalates to the alert view. This cutoff is fixed and
    /// does not follow the numeric rule table.
    pub fn should_promote(result: &ClassificationResult) -> bool {
        matches!(result.risk, RiskLevel::High | RiskLevel::Medium)
    }

    pub fn headline(risk: RiskLevel) -> &'static str {
        match risk {
            RiskLevel::High => "High Risk Alert",
            RiskLevel::Medium => "Medium Risk Alert",
            RiskLevel::Low => "Low Risk Alert",
            RiskLevel::None => "No Risk Detected",
        }
    }

    pub fn present(result: &ClassificationResult) -> PredictionView {
        PredictionView {
            result: result.clone(),
            headline: Self::headline(result.risk),
            promoted: Self::should_promote(result),
        }
    }

    pub fn banner(registry: &WarningRegistry) -> Option<ActiveWarningsBanner> {
        match registry.count() {
            0 => None,
            count => Some(ActiveWarningsBanner { count }),
        }
    }

    pub fn alert_view(
        latest: Option<&ClassificationResult>,
        registry: &WarningRegistry,
    ) -> AlertView {
        AlertView {
            prediction: latest.map(Self::present),
            warnings: registry.list(),
            banner: Self::banner(registry),
        }
    }

    pub fn dashboard_view(registry: &WarningRegistry) -> DashboardView {
        DashboardView {
            banner: Self::banner(registry),
            preview: registry.preview(DASHBOARD_PREVIEW_LEN),
            total: registry.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::DisasterCategory;
    use crate::registry::Severity;
    use proptest::prelude::*;

    fn result(risk: RiskLevel) -> ClassificationResult {
        ClassificationResult {
            category: DisasterCategory::Flood,
            risk,
            message: "test".to_string(),
        }
    }

    #[test]
    fn promotes_only_medium_and_high() {
        assert!(AlertCoordinator::should_promote(&result(RiskLevel::High)));
        assert!(AlertCoordinator::should_promote(&result(RiskLevel::Medium)));
        assert!(!AlertCoordinator::should_promote(&result(RiskLevel::Low)));
        assert!(!AlertCoordinator::should_promote(&result(RiskLevel::None)));
    }

    #[test]
    fn headlines_match_risk() {
        assert_eq!(AlertCoordinator::headline(RiskLevel::High), "High Risk Alert");
        assert_eq!(AlertCoordinator::headline(RiskLevel::None), "No Risk Detected");
    }

    #[test]
    fn banner_tracks_registry_count() {
        let mut registry = WarningRegistry::new();
        assert_eq!(AlertCoordinator::banner(&registry), None);

        let first = registry
            .add("Evacuate now", "Flood", Severity::High, "Riverside")
            .unwrap();
        registry
            .add("Secure loose objects", "Storm", Severity::Low, "Harbor")
            .unwrap();
        assert_eq!(
            AlertCoordinator::banner(&registry),
            Some(ActiveWarningsBanner { count: 2 })
        );

        registry.remove(first.id);
        assert_eq!(
            AlertCoordinator::banner(&registry),
            Some(ActiveWarningsBanner { count: 1 })
        );

        let remaining = registry.list()[0].id;
        registry.remove(remaining);
        assert_eq!(AlertCoordinator::banner(&registry), None);
    }

    #[test]
    fn alert_view_merges_prediction_and_warnings() {
        let mut registry = WarningRegistry::new();
        registry
            .add("Evacuate now", "Flood", Severity::High, "Riverside")
            .unwrap();
        let latest = result(RiskLevel::Medium);

        let view = AlertCoordinator::alert_view(Some(&latest), &registry);
        let prediction = view.prediction.unwrap();
        assert!(prediction.promoted);
        assert_eq!(prediction.headline, "Medium Risk Alert");
        assert_eq!(view.warnings.len(), 1);
        assert_eq!(view.banner, Some(ActiveWarningsBanner { count: 1 }));
    }

    #[test]
    fn alert_view_without_prediction_or_warnings_is_empty() {
        let registry = WarningRegistry::new();
        let view = AlertCoordinator::alert_view(None, &registry);
        assert!(view.prediction.is_none());
        assert!(view.warnings.is_empty());
        assert!(view.banner.is_none());
    }

    #[test]
    fn dashboard_previews_first_two_warnings() {
        let mut registry = WarningRegistry::new();
        for message in ["one", "two", "three"] {
            registry
                .add(message, "Tornado", Severity::Medium, "Plains")
                .unwrap();
        }

        let view = AlertCoordinator::dashboard_view(&registry);
        assert_eq!(view.total, 3);
        assert_eq!(view.preview.len(), DASHBOARD_PREVIEW_LEN);
        assert_eq!(view.preview[0].message, "one");
        assert_eq!(view.banner, Some(ActiveWarningsBanner { count: 3 }));
    }

    proptest! {
        #[test]
        fn promotion_holds_iff_medium_or_above(index in 0usize..4) {
            let risk = [RiskLevel::None, RiskLevel::Low, RiskLevel::Medium, RiskLevel::High][index];
            let promoted = AlertCoordinator::should_promote(&result(risk));
            prop_assert_eq!(promoted, risk >= RiskLevel::Medium);
        }
    }

    #[test]
    fn prediction_view_serializes_flat() {
        let view = AlertCoordinator::present(&result(RiskLevel::High));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["risk"], "high");
        assert_eq!(json["category"], "flood");
        assert_eq!(json["promoted"], true);
    }
}
