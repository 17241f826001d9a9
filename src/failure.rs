//! Structured assertion failure payloads.
//!
//! An [`AssertionFailure`] is what an assertion hands back to the caller when the
//! verified property does not hold: a fixed description, an optional custom message,
//! labeled values for a report renderer and the text of any error caught while
//! evaluating the property.

use std::fmt;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::config::VerifyConfig;

/// Labels longer than this are truncated before rendering.
pub const MAX_LABEL_LENGTH: usize = 100;

const TRUNCATION_MARKER: &str = "...";

/// One labeled, pre-formatted value attached to a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue {
    /// Short label, e.g. `Expected Value`.
    pub label: String,
    /// Formatted value.
    pub value: String,
}

/// Structured description of a failed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Fixed description of what was expected.
    pub description: String,
    /// Optional caller-supplied message.
    #[serde(default)]
    pub message: Option<String>,
    /// Labeled values in insertion order.
    #[serde(default)]
    pub labeled_values: Vec<LabeledValue>,
    /// Text of errors caught while evaluating the assertion.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AssertionFailure {
    /// Look up a labeled value by label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.labeled_values
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    /// Serialize the failure to pretty JSON for an external report renderer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)?;
        if let Some(message) = &self.message {
            write!(f, "\n{message}")?;
        }

        let width = self
            .labeled_values
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.labeled_values {
            write!(f, "\n{:<width$} : {}", entry.label, entry.value)?;
        }
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

/// Incremental builder for [`AssertionFailure`].
#[derive(Debug, Clone)]
pub struct AssertionFailureBuilder {
    failure: AssertionFailure,
    max_value_length: usize,
}

impl AssertionFailureBuilder {
    /// Start a failure with the default formatting limits.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_config(description, &VerifyConfig::default())
    }

    /// Start a failure formatted according to `config`.
    pub fn with_config(description: impl Into<String>, config: &VerifyConfig) -> Self {
        Self {
            failure: AssertionFailure {
                description: description.into(),
                message: None,
                labeled_values: Vec::new(),
                errors: Vec::new(),
            },
            max_value_length: config.max_formatted_value_length,
        }
    }

    /// Set the custom message. `None` leaves it unset.
    pub fn message(mut self, message: Option<impl Into<String>>) -> Self {
        self.failure.message = message.map(Into::into);
        self
    }

    /// Add the `Expected Value` label.
    pub fn expected<T: Debug + ?Sized>(self, value: &T) -> Self {
        self.labeled("Expected Value", value)
    }

    /// Add the `Actual Value` label.
    pub fn actual<T: Debug + ?Sized>(self, value: &T) -> Self {
        self.labeled("Actual Value", value)
    }

    /// Add a value formatted with `Debug`.
    pub fn labeled<T: Debug + ?Sized>(self, label: impl Into<String>, value: &T) -> Self {
        let formatted = format!("{value:?}");
        self.labeled_text(label, formatted)
    }

    /// Add a value that is already formatted.
    pub fn labeled_text(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = truncate(label.into(), MAX_LABEL_LENGTH);
        let value = truncate(value.into(), self.max_value_length);
        match self
            .failure
            .labeled_values
            .iter_mut()
            .find(|entry| entry.label == label)
        {
            Some(entry) => entry.value = value,
            None => self.failure.labeled_values.push(LabeledValue { label, value }),
        }
        self
    }

    /// Attach the text of an error caught during evaluation.
    pub fn error(mut self, error: impl fmt::Display) -> Self {
        self.failure.errors.push(error.to_string());
        self
    }

    /// Finish the failure.
    #[must_use]
    pub fn build(self) -> AssertionFailure {
        self.failure
    }
}

fn truncate(mut text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    if max_chars < TRUNCATION_MARKER.len() {
        return TRUNCATION_MARKER[..max_chars].to_string();
    }
    let keep = max_chars - TRUNCATION_MARKER.len();
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    text.truncate(cut);
    text.push_str(TRUNCATION_MARKER);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_aligns_labels() {
        let failure = AssertionFailureBuilder::new("Expected a thing.")
            .message(Some("custom"))
            .expected(&3)
            .labeled("Position", &1)
            .build();

        assert_eq!(
            failure.to_string(),
            "Expected a thing.\ncustom\nExpected Value : 3\nPosition       : 1"
        );
    }

    #[test]
    fn same_label_replaces_previous_value() {
        let failure = AssertionFailureBuilder::new("x")
            .labeled("A", &1)
            .labeled("A", &2)
            .build();
        assert_eq!(failure.labeled_values.len(), 1);
        assert_eq!(failure.value("A"), Some("2"));
    }

    #[test]
    fn long_values_are_truncated() {
        let config = VerifyConfig::default().with_max_formatted_value_length(10);
        let failure = AssertionFailureBuilder::with_config("x", &config)
            .labeled_text("Sequence", "abcdefghijklmnop")
            .build();
        assert_eq!(failure.value("Sequence"), Some("abcdefg..."));
    }

    #[test]
    fn tiny_limits_never_exceed_the_limit() {
        for limit in 0..=3 {
            let config = VerifyConfig::default().with_max_formatted_value_length(limit);
            let failure = AssertionFailureBuilder::with_config("x", &config)
                .labeled_text("Sequence", "abcdefghijklmnop")
                .build();
            let value = failure.value("Sequence").expect("sequence label");
            assert_eq!(value.chars().count(), limit, "limit {limit}: {value:?}");
        }
    }

    #[test]
    fn json_export_keeps_all_fields() {
        let failure = AssertionFailureBuilder::new("x")
            .actual(&"value")
            .error("boom")
            .build();
        let json = failure.to_json().expect("failure should serialize");
        let decoded: AssertionFailure = serde_json::from_str(&json).expect("json should decode");
        assert_eq!(decoded, failure);
    }
}
