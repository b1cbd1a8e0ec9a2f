//! LLM-backed intent classifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::{IntentClassifier, IntentVerdict, parse_intent_label};

const CLASSIFIER_TEMPERATURE: f32 = 0.0;
const CLASSIFIER_MAX_TOKENS: u32 = 16;

const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You are an intent classification system for AutoStream, a SaaS video editing platform.

Classify the user's message into one of these intents:
1. \"greeting\" - Casual greetings, hello, hi, etc.
2. \"product_inquiry\" - Questions about pricing, features, plans, policies
3. \"high_intent_lead\" - User shows clear interest in signing up, wants to try/buy, mentions their platform/channel, ready to proceed

Consider the conversation history to understand context. A user asking about pricing is \"product_inquiry\", but if they say \"I want to try/sign up/buy\" or mention their platform, classify as \"high_intent_lead\".

Respond with ONLY the intent name: greeting, product_inquiry, or high_intent_lead";

/// Classifies user messages with a single low-temperature LLM call.
pub struct LlmIntentClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl LlmIntentClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, message: &str, history: &str) -> Result<IntentVerdict, LlmError> {
        let history = if history.is_empty() {
            "No previous conversation."
        } else {
            history
        };

        let request = CompletionRequest::new(vec![
            ChatMessage::system(CLASSIFIER_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Conversation history:\n{history}\n\nUser message: {message}\n\nIntent:"
            )),
        ])
        .with_temperature(CLASSIFIER_TEMPERATURE)
        .with_max_tokens(CLASSIFIER_MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        let verdict = parse_intent_label(&response.content);
        debug!(raw = %response.content.trim(), "Intent classified");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use crate::llm::{CompletionResponse, FinishReason};

    /// Stub provider that echoes a fixed label.
    struct FixedLabelLlm {
        label: &'static str,
    }

    #[async_trait]
    impl LlmProvider for FixedLabelLlm {
        fn model_name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                content: self.label.to_string(),
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Stop,
            })
        }
    }

    #[tokio::test]
    async fn known_label_round_trips() {
        let classifier = LlmIntentClassifier::new(Arc::new(FixedLabelLlm {
            label: "high_intent_lead\n",
        }));
        let verdict = classifier.classify("sign me up", "").await.unwrap();
        assert_eq!(verdict, IntentVerdict::Known(Intent::HighIntentLead));
    }

    #[tokio::test]
    async fn unknown_label_is_surfaced_not_defaulted() {
        let classifier = LlmIntentClassifier::new(Arc::new(FixedLabelLlm {
            label: "I think this is a greeting",
        }));
        let verdict = classifier.classify("hi", "").await.unwrap();
        assert!(matches!(verdict, IntentVerdict::Unrecognized(_)));
    }
}
