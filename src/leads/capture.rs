//! Lead capture sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CaptureError;

use super::model::CompletedLead;

/// Status record returned by a capture call. The downstream endpoint
/// defines the status vocabulary; `"success"` is the only value the
/// bundled sink produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub status: String,
    pub message: String,
}

/// Downstream sink that receives completed leads.
///
/// By contract a failure here is recoverable: the dialogue still shows its
/// confirmation and the caller logs the error.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn capture(&self, lead: &CompletedLead) -> Result<CaptureOutcome, CaptureError>;
}

/// Sink that records captures to the log, standing in for a CRM endpoint.
pub struct LoggingLeadSink;

impl LoggingLeadSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingLeadSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadSink for LoggingLeadSink {
    async fn capture(&self, lead: &CompletedLead) -> Result<CaptureOutcome, CaptureError> {
        info!(
            name = %lead.name,
            email = %lead.email,
            platform = %lead.platform,
            "Lead captured"
        );
        Ok(CaptureOutcome {
            status: "success".to_string(),
            message: format!(
                "Lead captured successfully: {}, {}, {}",
                lead.name, lead.email, lead.platform
            ),
        })
    }
}
