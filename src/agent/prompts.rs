//! Fixed prompt and response texts for the dialogue branches.

use crate::leads::{CompletedLead, LeadField};

/// Role instruction for the greeting branch.
pub const GREETING_SYSTEM_PROMPT: &str = "\
You are a friendly AI assistant for AutoStream, an automated video editing platform for content creators. \
Respond warmly to greetings and offer to help with information about AutoStream's pricing, features, or plans.";

/// Role instruction for the inquiry branch, with retrieved knowledge-base
/// context spliced in.
pub fn inquiry_system_prompt(context: &str) -> String {
    format!(
        "You are a helpful AI assistant for AutoStream, an automated video editing platform for content creators.\n\n\
         Use the following knowledge base information to answer user questions accurately:\n\n\
         {context}\n\n\
         Answer questions clearly and concisely. If asked about pricing, provide specific details about both plans. \
         If asked about features, be specific about what each plan includes."
    )
}

/// Re-prompt shown when the stored email fails validation at completion.
pub const INVALID_EMAIL_REPROMPT: &str =
    "I need a valid email address. Could you please provide your email?";

/// Prompt for the fields still missing from the lead record.
///
/// `missing` arrives in fixed name → email → platform order; each possible
/// subset has its own phrasing.
pub fn missing_fields_prompt(missing: &[LeadField]) -> String {
    use LeadField::*;

    match missing {
        [Name] => "What's your name?".to_string(),
        [Email] => "What's your email address?".to_string(),
        [Platform] => {
            "Which platform do you create content on? (YouTube, Instagram, TikTok, etc.)"
                .to_string()
        }
        [Name, Email] => "I'd like to collect your name and email address to proceed.".to_string(),
        [Name, Platform] => {
            "I'd like to know your name and which platform you create content on.".to_string()
        }
        [Email, Platform] => {
            "I'd like to collect your email and which platform you create content on.".to_string()
        }
        _ => "Great! I'd love to help you get started with AutoStream. To proceed, I'll need a few details:\n\n\
              1. What's your name?\n\
              2. What's your email address?\n\
              3. Which platform do you create content on? (YouTube, Instagram, TikTok, etc.)"
            .to_string(),
    }
}

/// Confirmation echoing the captured lead.
pub fn confirmation(lead: &CompletedLead) -> String {
    format!(
        "Perfect! I've captured your information:\n\
         - Name: {}\n\
         - Email: {}\n\
         - Platform: {}\n\n\
         Our team will reach out to you shortly to help you get started with AutoStream!",
        lead.name, lead.email, lead.platform
    )
}
