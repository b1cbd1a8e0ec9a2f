//! AutoStream Agent — conversational lead-capture core.
//!
//! Routes each user turn to a greeting, product-inquiry, or lead-collection
//! branch and runs the multi-turn slot-filling protocol that captures a
//! sales lead (name, email, platform) from free text.

pub mod agent;
pub mod config;
pub mod error;
pub mod intent;
pub mod leads;
pub mod llm;
pub mod retrieval;
