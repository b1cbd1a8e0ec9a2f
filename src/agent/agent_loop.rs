//! The dialogue loop: intent resolution, branch routing, and slot-filling
//! orchestration.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::AgentConfig;
use crate::error::Result;
use crate::intent::{Intent, IntentClassifier, IntentVerdict};
use crate::leads::{Extractor, LeadRecord, LeadSink, SlotPhase};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::retrieval::Retriever;

use super::prompts;
use super::state::{ConversationState, Speaker, Turn};

/// Outcome of one processed turn: the agent's reply and the sole valid
/// successor state.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: String,
    pub state: ConversationState,
}

/// External collaborators the agent depends on.
pub struct AgentDeps {
    pub llm: Arc<dyn LlmProvider>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub retriever: Arc<dyn Retriever>,
    pub lead_sink: Arc<dyn LeadSink>,
}

/// The conversational agent.
pub struct Agent {
    llm: Arc<dyn LlmProvider>,
    classifier: Arc<dyn IntentClassifier>,
    retriever: Arc<dyn Retriever>,
    lead_sink: Arc<dyn LeadSink>,
    extractor: Extractor,
    history_window: usize,
    temperature: f32,
}

impl Agent {
    pub fn new(deps: AgentDeps, config: &AgentConfig) -> Self {
        Self {
            llm: deps.llm,
            classifier: deps.classifier,
            retriever: deps.retriever,
            lead_sink: deps.lead_sink,
            extractor: Extractor::new(),
            history_window: config.history_window,
            temperature: config.temperature,
        }
    }

    /// Process one user turn.
    ///
    /// The incoming state is left untouched; on success the returned state
    /// is the only valid successor. On error the caller keeps `state` — no
    /// partial mutation is observable. Turns against the same conversation
    /// must be serialized by the caller.
    pub async fn process_turn(
        &self,
        state: &ConversationState,
        message: &str,
    ) -> Result<TurnOutcome> {
        // Bounded classifier context, excluding the current message.
        let window = state.history_window(self.history_window);

        let mut next = state.clone();
        next.history.push(Turn::user(message));

        let resolved = if next.lead.phase() == SlotPhase::Collecting {
            // Mid slot-filling: stay in the lead branch no matter how this
            // message would classify on its own.
            Intent::HighIntentLead
        } else {
            match self.classifier.classify(message, &window).await? {
                IntentVerdict::Known(intent) => intent,
                IntentVerdict::Unrecognized(raw) => {
                    debug!(raw = %raw, "Unrecognized intent label, defaulting to product_inquiry");
                    Intent::ProductInquiry
                }
            }
        };

        next.intent = Some(resolved);
        next.turn_count += 1;

        let response = match resolved {
            Intent::Greeting => self.handle_greeting(&next).await?,
            Intent::ProductInquiry => self.handle_inquiry(&next, message).await?,
            Intent::HighIntentLead => {
                let (response, lead) = self.handle_lead(&next.lead, message).await;
                next.lead = lead;
                response
            }
        };

        next.history.push(Turn::agent(response.as_str()));
        Ok(TurnOutcome {
            response,
            state: next,
        })
    }

    /// Greeting branch: fixed role instruction plus history; the LLM output
    /// is the response, verbatim.
    async fn handle_greeting(&self, state: &ConversationState) -> Result<String> {
        let messages = chat_messages(prompts::GREETING_SYSTEM_PROMPT, &state.history);
        let request = CompletionRequest::new(messages).with_temperature(self.temperature);
        Ok(self.llm.complete(request).await?.content)
    }

    /// Inquiry branch: retrieval context spliced into the role instruction.
    async fn handle_inquiry(&self, state: &ConversationState, message: &str) -> Result<String> {
        let context = self.retriever.get_context(message).await?;
        let system = prompts::inquiry_system_prompt(&context);
        let messages = chat_messages(&system, &state.history);
        let request = CompletionRequest::new(messages).with_temperature(self.temperature);
        Ok(self.llm.complete(request).await?.content)
    }

    /// Lead branch: extract, merge, then either prompt for what is missing
    /// or validate and hand the finished lead to the capture sink.
    async fn handle_lead(&self, lead: &LeadRecord, message: &str) -> (String, LeadRecord) {
        // Already captured earlier in this conversation: confirm again but
        // never re-invoke the sink.
        if let Some(completed) = lead.completed() {
            return (prompts::confirmation(&completed), lead.clone());
        }

        let mut lead = lead.clone();
        let extracted = self.extractor.extract(message);
        lead.merge(&extracted);

        let missing = lead.missing_fields();
        if !missing.is_empty() {
            return (prompts::missing_fields_prompt(&missing), lead);
        }

        // All three fields present. Completion-time email validation is
        // mandatory: the stored value may have been committed without a
        // syntax check, and an invalid one stays in place but becomes
        // replaceable on the next turn.
        let Some(completed) = lead.completed() else {
            return (prompts::INVALID_EMAIL_REPROMPT.to_string(), lead);
        };

        match self.lead_sink.capture(&completed).await {
            Ok(outcome) => debug!(status = %outcome.status, "Lead capture acknowledged"),
            Err(e) => error!(error = %e, "Lead capture failed; conversation continues"),
        }

        (prompts::confirmation(&completed), lead)
    }
}

/// Render the transcript as chat messages under a system instruction.
fn chat_messages(system: &str, history: &[Turn]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system));
    for turn in history {
        messages.push(match turn.speaker {
            Speaker::User => ChatMessage::user(turn.content.as_str()),
            Speaker::Agent => ChatMessage::assistant(turn.content.as_str()),
        });
    }
    messages
}
