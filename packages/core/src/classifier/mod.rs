//! Risk Classification Module
//!
//! Maps validated measurements for one disaster category onto a risk band
//! and a fixed advisory message using a static threshold table.

pub mod engine;
pub mod rules;
pub mod types;


pub use engine::{classify, Classifier};
pub use rules::{Band, CategoryRules, RuleError, RuleTable};
pub use types::*;
