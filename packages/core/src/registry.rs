//! In-memory warning registry.
//!
//! `WarningRegistry` holds the operator-issued warnings that are currently
//! active, in the order they were issued. Warnings are never edited in
//! place: to change one, remove it and add a replacement.
//!
//! The registry does no locking of its own. The service shares it through
//! [`AlertDesk`](crate::desk::AlertDesk) behind an `Arc<RwLock<_>>`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::RiskLevel;
use crate::error::ValidationError;
use crate::validation::non_blank;

/// Severity an operator may attach to a warning. There is deliberately no
/// `none` level: a warning always signals some risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("Invalid severity '{}'", other)),
        }
    }
}

impl From<Severity> for RiskLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => RiskLevel::Low,
            Severity::Medium => RiskLevel::Medium,
            Severity::High => RiskLevel::High,
        }
    }
}

/// An operator-issued warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub id: i64,
    pub message: String,
    /// Free-text label such as "Flood", "Wildfire" or "Hurricane".
    pub category: String,
    pub severity: Severity,
    pub location: String,
    pub issued_at: DateTime<Utc>,
}

impl Warning {
    /// Display heading, e.g. "Flood Warning".
    pub fn title(&self) -> String {
        format!("{} Warning", self.category)
    }
}

/// Hands out warning ids derived from the creation timestamp (milliseconds).
///
/// Two ids issued within the same millisecond, or after the wall clock
/// stepped backwards, are bumped to `last + 1`, so ids stay unique and
/// strictly increasing.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

/// Ordered, in-memory collection of active warnings.
#[derive(Debug, Default)]
pub struct WarningRegistry {
    warnings: Vec<Warning>,
    ids: IdGenerator,
}

impl WarningRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new warning and append it to the registry.
    ///
    /// Message, category and location must be non-blank after trimming; on
    /// failure the registry is left untouched.
    pub fn add(
        &mut self,
        message: &str,
        category: &str,
        severity: Severity,
        location: &str,
    ) -> Result<Warning, ValidationError> {
        let message = non_blank(Some(message)).ok_or(ValidationError::MissingWarningMessage)?;
        let location = non_blank(Some(location)).ok_or(ValidationError::MissingWarningLocation)?;
        let category = non_blank(Some(category)).ok_or(ValidationError::MissingWarningCategory)?;

        let issued_at = Utc::now();
        let warning = Warning {
            id: self.ids.next(issued_at),
            message,
            category,
            severity,
            location,
            issued_at,
        };

        self.warnings.push(warning.clone());
        Ok(warning)
    }

    /// Remove the warning with `id`. Returns `false` when no such warning
    /// exists; removing twice is a harmless no-op.
    pub fn remove(&mut self, id: i64) -> bool {
        match self.warnings.iter().position(|w| w.id == id) {
            Some(index) => {
                self.warnings.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of all warnings, in issue order.
    pub fn list(&self) -> Vec<Warning> {
        self.warnings.clone()
    }

    /// The first `n` warnings in issue order.
    pub fn preview(&self, n: usize) -> Vec<Warning> {
        self.warnings.iter().take(n).cloned().collect()
    }

    /// The warning with `id`, if it is still active.
    pub fn get(&self, id: i64) -> Option<Warning> {
        self.warnings.iter().find(|w| w.id == id).cloned()
    }

    /// Number of active warnings.
    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
