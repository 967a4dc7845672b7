//! Declarative extraction rules.

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Position field a rule extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    Speed,
    Course,
    Status,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
            Self::Speed => write!(f, "speed"),
            Self::Course => write!(f, "course"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// Errors building a rule set.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: Field,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern for {field} has no capture group: {pattern}")]
    MissingCaptureGroup { field: Field, pattern: String },
}

/// One (field → pattern) rule. Capture group 1 holds the value.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    field: Field,
    pattern: Regex,
}

impl ExtractionRule {
    pub fn new(field: Field, pattern: &str) -> Result<Self, ExtractionError> {
        let pattern =
            Regex::new(pattern).map_err(|source| ExtractionError::InvalidPattern { field, source })?;
        if pattern.captures_len() < 2 {
            return Err(ExtractionError::MissingCaptureGroup {
                field,
                pattern: pattern.as_str().to_string(),
            });
        }
        Ok(Self { field, pattern })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Capture group 1 as a trimmed, non-empty string.
    pub fn capture_text(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Capture group 1 parsed as a finite number.
    pub fn capture_number(&self, text: &str) -> Option<f64> {
        self.capture_text(text)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// Ordered rule set for one provider.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRules {
    rules: Vec<ExtractionRule>,
}

impl ExtractionRules {
    pub fn builder() -> ExtractionRulesBuilder {
        ExtractionRulesBuilder::default()
    }

    /// Rules for one field, in priority order.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ExtractionRule> {
        self.rules.iter().filter(move |r| r.field == field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects patterns and compiles them all in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ExtractionRulesBuilder {
    pending: Vec<(Field, String)>,
}

impl ExtractionRulesBuilder {
    pub fn rule(mut self, field: Field, pattern: impl Into<String>) -> Self {
        self.pending.push((field, pattern.into()));
        self
    }

    pub fn build(self) -> Result<ExtractionRules, ExtractionError> {
        let rules = self
            .pending
            .iter()
            .map(|(field, pattern)| ExtractionRule::new(*field, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExtractionRules { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_regex() {
        let result = ExtractionRules::builder()
            .rule(Field::Latitude, r"(\d+")
            .build();
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidPattern {
                field: Field::Latitude,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_capture_group() {
        let result = ExtractionRules::builder()
            .rule(Field::Speed, r"\d+ kn")
            .build();
        assert!(matches!(
            result,
            Err(ExtractionError::MissingCaptureGroup { .. })
        ));
    }

    #[test]
    fn test_for_field_preserves_order() {
        let rules = ExtractionRules::builder()
            .rule(Field::Latitude, r"a(\d)")
            .rule(Field::Speed, r"s(\d)")
            .rule(Field::Latitude, r"b(\d)")
            .build()
            .unwrap();

        let patterns: Vec<_> = rules.for_field(Field::Latitude).map(|r| r.pattern()).collect();
        assert_eq!(patterns, vec![r"a(\d)", r"b(\d)"]);
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_non_numeric_capture_is_no_match() {
        let rule = ExtractionRule::new(Field::Speed, r"speed: (\S+)").unwrap();
        assert_eq!(rule.capture_number("speed: n/a"), None);
        assert_eq!(rule.capture_number("speed: 4.5"), Some(4.5));
    }
}
