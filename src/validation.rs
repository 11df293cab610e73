//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy: errors block before any output, warnings are reported and ignored.

use serde::{Deserialize, Serialize};

use crate::record::SourceRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// Required field missing: the run must halt before producing output.
    Error,
    /// Recommended field missing: reported, never blocks.
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Dotted path into the data file, e.g. `contact.phone`.
    pub field: String,
    pub severity: ViolationSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error)
    }

    /// Every missing required field, never just the first.
    pub fn missing_required(&self) -> Vec<&ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
            .collect()
    }

    pub fn missing_recommended(&self) -> Vec<&ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Warning)
            .collect()
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, record: &SourceRecord) -> Vec<ValidationViolation>;
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

// --- Concrete Rules ---

/// The four fields without which no artifact can be produced.
pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    fn validate(&self, record: &SourceRecord) -> Vec<ValidationViolation> {
        let checks: [(&str, &str, &str); 4] = [
            ("personal.fullName", &record.personal.full_name, "full name missing"),
            ("contact.phone", &record.contact.phone, "phone number missing"),
            ("contact.email", &record.contact.email, "email address missing"),
            ("social.website", &record.social.website, "website URL missing"),
        ];

        checks
            .iter()
            .filter(|(_, value, _)| blank(value))
            .map(|(field, _, message)| ValidationViolation {
                field: (*field).to_string(),
                severity: ViolationSeverity::Error,
                message: (*message).to_string(),
            })
            .collect()
    }
}

/// Fields that enrich the card but never block a run.
pub struct RecommendedFieldsRule;

impl ValidationRule for RecommendedFieldsRule {
    fn name(&self) -> &'static str {
        "recommended_fields"
    }

    fn validate(&self, record: &SourceRecord) -> Vec<ValidationViolation> {
        if blank(&record.personal.name_initial) {
            vec![ValidationViolation {
                field: "personal.nameInitial".to_string(),
                severity: ViolationSeverity::Warning,
                message: "recommended field used in the card's NOTE line".to_string(),
            }]
        } else {
            vec![]
        }
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(RequiredFieldsRule), Box::new(RecommendedFieldsRule)],
        }
    }

    pub fn validate(&self, record: &SourceRecord) -> ValidationResult {
        let mut violations = vec![];
        for rule in &self.rules {
            violations.extend(rule.validate(record));
        }

        let has_errors = violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        ValidationResult {
            valid: !has_errors,
            violations,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal JSON shape to print alongside a required-field failure.
pub fn example_document() -> serde_json::Value {
    serde_json::json!({
        "personal": { "fullName": "LASTNAME Firstname" },
        "contact": { "phone": "+33...", "email": "email@example.tld" },
        "social": { "website": "https://your-site.tld" }
    })
}
