//! Intent classification.
//!
//! Every user turn resolves to exactly one of three intents. The classifier
//! is an external collaborator behind [`IntentClassifier`]; its raw label is
//! parsed into an [`IntentVerdict`] at the boundary, and the dialogue loop
//! owns the fallback policy for unrecognized labels.

pub mod llm_classifier;

pub use llm_classifier::LlmIntentClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// The classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    ProductInquiry,
    HighIntentLead,
}

impl Intent {
    /// The wire label for this intent.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::ProductInquiry => "product_inquiry",
            Self::HighIntentLead => "high_intent_lead",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a classification call.
///
/// Unrecognized labels are surfaced as-is rather than silently mapped, so
/// the caller can apply (and log) its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentVerdict {
    Known(Intent),
    Unrecognized(String),
}

/// Parse a classifier label into a verdict.
///
/// Tolerates surrounding whitespace and case, nothing else.
pub fn parse_intent_label(raw: &str) -> IntentVerdict {
    match raw.trim().to_lowercase().as_str() {
        "greeting" => IntentVerdict::Known(Intent::Greeting),
        "product_inquiry" => IntentVerdict::Known(Intent::ProductInquiry),
        "high_intent_lead" => IntentVerdict::Known(Intent::HighIntentLead),
        _ => IntentVerdict::Unrecognized(raw.trim().to_string()),
    }
}

/// A three-way intent classifier over a message plus conversation context.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, message: &str, history: &str) -> Result<IntentVerdict, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_labels() {
        assert_eq!(
            parse_intent_label("greeting"),
            IntentVerdict::Known(Intent::Greeting)
        );
        assert_eq!(
            parse_intent_label("product_inquiry"),
            IntentVerdict::Known(Intent::ProductInquiry)
        );
        assert_eq!(
            parse_intent_label("high_intent_lead"),
            IntentVerdict::Known(Intent::HighIntentLead)
        );
    }

    #[test]
    fn tolerates_case_and_whitespace() {
        assert_eq!(
            parse_intent_label("  Greeting\n"),
            IntentVerdict::Known(Intent::Greeting)
        );
        assert_eq!(
            parse_intent_label("HIGH_INTENT_LEAD"),
            IntentVerdict::Known(Intent::HighIntentLead)
        );
    }

    #[test]
    fn surfaces_unknown_labels() {
        assert_eq!(
            parse_intent_label("purchase_intent"),
            IntentVerdict::Unrecognized("purchase_intent".to_string())
        );
        assert_eq!(parse_intent_label(""), IntentVerdict::Unrecognized(String::new()));
    }

    #[test]
    fn display_matches_serde() {
        for intent in [Intent::Greeting, Intent::ProductInquiry, Intent::HighIntentLead] {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{intent}\""));
        }
    }
}
