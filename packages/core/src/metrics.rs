//! Prometheus metrics registry for the disaster prediction service.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and hand it to
//! the API state.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{Counter, CounterVec, Gauge, Opts, Registry};

use crate::classifier::ClassificationResult;

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Classifications served, labelled by category and risk.
    pub classifications_total: CounterVec,
    /// Classifications that escalated to the alert view.
    pub promotions_total: Counter,
    /// Requests rejected at the validation boundary.
    pub validation_failures_total: Counter,
    /// Current number of active operator warnings.
    pub active_warnings: Gauge,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let classifications_total = CounterVec::new(
            Opts::new(
                "disaster_predict_classifications_total",
                "Classifications by category and risk",
            ),
            &["category", "risk"],
        )?;

        let promotions_total = Counter::with_opts(Opts::new(
            "disaster_predict_promotions_total",
            "Classifications promoted to an alert",
        ))?;

        let validation_failures_total = Counter::with_opts(Opts::new(
            "disaster_predict_validation_failures_total",
            "Requests rejected by input validation",
        ))?;

        let active_warnings = Gauge::with_opts(Opts::new(
            "disaster_predict_active_warnings",
            "Current size of the WarningRegistry",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "disaster_predict_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        registry.register(Box::new(classifications_total.clone()))?;
        registry.register(Box::new(promotions_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(active_warnings.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            classifications_total,
            promotions_total,
            validation_failures_total,
            active_warnings,
            http_requests_total,
            registry,
        })
    }

    /// Count one classification and, if it escalated, one promotion.
    pub fn record_classification(&self, result: &ClassificationResult, promoted: bool) {
        self.classifications_total
            .with_label_values(&[result.category.as_str(), result.risk.as_str()])
            .inc();
        if promoted {
            self.promotions_total.inc();
        }
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{DisasterCategory, RiskLevel};

    fn result(risk: RiskLevel) -> ClassificationResult {
        ClassificationResult {
            category: DisasterCategory::Tsunami,
            risk,
            message: String::new(),
        }
    }

    #[test]
    fn all_metrics_register_without_error() {
        let metrics = AppMetrics::new();
        assert!(metrics.is_ok(), "AppMetrics::new() failed: {:?}", metrics.err());
    }

    #[test]
    fn record_classification_counts_by_label() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_classification(&result(RiskLevel::High), true);
        metrics.record_classification(&result(RiskLevel::High), true);
        metrics.record_classification(&result(RiskLevel::Low), false);

        let high = metrics
            .classifications_total
            .with_label_values(&["tsunami", "high"])
            .get();
        assert!((high - 2.0).abs() < f64::EPSILON);
        assert!((metrics.promotions_total.get() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn render_contains_metric_names_after_increment() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_classification(&result(RiskLevel::Medium), true);
        metrics.validation_failures_total.inc();
        metrics.active_warnings.set(3.0);
        metrics
            .http_requests_total
            .with_label_values(&["GET", "/alerts", "200"])
            .inc();

        let output = metrics.render().unwrap();
        assert!(output.contains("disaster_predict_classifications_total"));
        assert!(output.contains("disaster_predict_promotions_total 1"));
        assert!(output.contains("disaster_predict_validation_failures_total 1"));
        assert!(output.contains("disaster_predict_active_warnings 3"));
        assert!(output.contains("disaster_predict_http_requests_total"));
    }
}
