//! Lead capture domain: field extraction, validation, the accumulated lead
//! record, and the downstream capture sink.

pub mod capture;
pub mod extract;
pub mod model;
pub mod validate;

pub use capture::{CaptureOutcome, LeadSink, LoggingLeadSink};
pub use extract::{ExtractionResult, Extractor};
pub use model::{CompletedLead, LeadField, LeadRecord, SlotPhase};
pub use validate::is_valid_email;
