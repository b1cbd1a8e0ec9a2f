//! The accumulated lead record and its slot-filling lifecycle.

use serde::{Deserialize, Serialize};

use super::extract::ExtractionResult;
use super::validate::is_valid_email;

/// One of the three fields collected for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Email,
    Platform,
}

/// Slot-filling lifecycle, derived from the record contents on demand so
/// the routing predicate and the completion predicate can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Nothing collected yet.
    Idle,
    /// At least one field captured, but the record is not yet complete
    /// (a field is unset, or the stored email fails validation).
    Collecting,
    /// All three fields captured and the email validates.
    Complete,
}

/// Partially collected lead data, accumulated across turns.
///
/// Absence and empty string both mean "not yet known". Fields are set once
/// and then frozen, with one exception: a stored email that fails
/// validation may be replaced by a later extraction, otherwise the
/// conversation could never complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl LeadRecord {
    pub fn has_name(&self) -> bool {
        field_set(&self.name)
    }

    pub fn has_email(&self) -> bool {
        field_set(&self.email)
    }

    pub fn has_platform(&self) -> bool {
        field_set(&self.platform)
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        !self.has_name() && !self.has_email() && !self.has_platform()
    }

    /// Derive the current slot-filling phase.
    pub fn phase(&self) -> SlotPhase {
        if self.is_empty() {
            SlotPhase::Idle
        } else if self.completed().is_some() {
            SlotPhase::Complete
        } else {
            SlotPhase::Collecting
        }
    }

    /// Fields not yet captured, in fixed name → email → platform order.
    ///
    /// Presence only: an email that is set but invalid is not "missing" —
    /// completion-time re-validation handles it.
    pub fn missing_fields(&self) -> Vec<LeadField> {
        let mut missing = Vec::new();
        if !self.has_name() {
            missing.push(LeadField::Name);
        }
        if !self.has_email() {
            missing.push(LeadField::Email);
        }
        if !self.has_platform() {
            missing.push(LeadField::Platform);
        }
        missing
    }

    /// Merge freshly extracted fields.
    ///
    /// Set-once: fields that already hold a value are left untouched —
    /// except an email whose stored value fails validation, which a new
    /// extraction may replace.
    pub fn merge(&mut self, extracted: &ExtractionResult) {
        if !self.has_name()
            && let Some(name) = non_empty(&extracted.name)
        {
            self.name = Some(name.to_string());
        }

        let email_replaceable =
            !self.has_email() || !is_valid_email(self.email.as_deref().unwrap_or_default());
        if email_replaceable
            && let Some(email) = non_empty(&extracted.email)
        {
            self.email = Some(email.to_string());
        }

        if !self.has_platform()
            && let Some(platform) = non_empty(&extracted.platform)
        {
            self.platform = Some(platform.to_string());
        }
    }

    /// The finished lead, if all three fields are set and the email is
    /// syntactically valid.
    pub fn completed(&self) -> Option<CompletedLead> {
        let name = self.name.as_deref().filter(|v| !v.is_empty())?;
        let email = self.email.as_deref().filter(|v| !v.is_empty())?;
        let platform = self.platform.as_deref().filter(|v| !v.is_empty())?;
        if !is_valid_email(email) {
            return None;
        }
        Some(CompletedLead {
            name: name.to_string(),
            email: email.to_string(),
            platform: platform.to_string(),
        })
    }
}

fn field_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A fully collected, validated lead, ready for the capture sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedLead {
    pub name: String,
    pub email: String,
    pub platform: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction(
        name: Option<&str>,
        email: Option<&str>,
        platform: Option<&str>,
    ) -> ExtractionResult {
        ExtractionResult {
            name: name.map(String::from),
            email: email.map(String::from),
            platform: platform.map(String::from),
        }
    }

    #[test]
    fn merge_fills_unset_fields() {
        let mut lead = LeadRecord::default();
        lead.merge(&extraction(Some("John Doe"), None, Some("YouTube")));
        assert_eq!(lead.name.as_deref(), Some("John Doe"));
        assert_eq!(lead.email, None);
        assert_eq!(lead.platform.as_deref(), Some("YouTube"));
    }

    #[test]
    fn set_fields_are_frozen() {
        let mut lead = LeadRecord::default();
        lead.merge(&extraction(Some("John Doe"), Some("john@example.com"), Some("YouTube")));
        lead.merge(&extraction(Some("Mallory"), Some("other@example.com"), Some("TikTok")));
        assert_eq!(lead.name.as_deref(), Some("John Doe"));
        assert_eq!(lead.email.as_deref(), Some("john@example.com"));
        assert_eq!(lead.platform.as_deref(), Some("YouTube"));
    }

    #[test]
    fn invalid_stored_email_is_replaceable() {
        let mut lead = LeadRecord {
            email: Some("john@invalid".to_string()),
            ..Default::default()
        };
        lead.merge(&extraction(None, Some("john@example.com"), None));
        assert_eq!(lead.email.as_deref(), Some("john@example.com"));

        // Once valid, the email freezes like any other field.
        lead.merge(&extraction(None, Some("other@example.com"), None));
        assert_eq!(lead.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    fn empty_string_counts_as_unset() {
        let mut lead = LeadRecord {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(!lead.has_name());
        assert!(lead.is_empty());

        lead.merge(&extraction(Some("John"), None, None));
        assert_eq!(lead.name.as_deref(), Some("John"));

        // Extracted empty strings never commit.
        let mut lead = LeadRecord::default();
        lead.merge(&extraction(Some(""), Some(""), Some("")));
        assert!(lead.is_empty());
    }

    #[test]
    fn missing_fields_in_fixed_order() {
        let lead = LeadRecord::default();
        assert_eq!(
            lead.missing_fields(),
            vec![LeadField::Name, LeadField::Email, LeadField::Platform]
        );

        let lead = LeadRecord {
            email: Some("a@b.co".to_string()),
            ..Default::default()
        };
        assert_eq!(lead.missing_fields(), vec![LeadField::Name, LeadField::Platform]);
    }

    #[test]
    fn invalid_email_is_present_not_missing() {
        let lead = LeadRecord {
            name: Some("John".to_string()),
            email: Some("john@invalid".to_string()),
            platform: Some("YouTube".to_string()),
        };
        assert!(lead.missing_fields().is_empty());
        assert_eq!(lead.completed(), None);
    }

    #[test]
    fn phase_derivation() {
        assert_eq!(LeadRecord::default().phase(), SlotPhase::Idle);

        let partial = LeadRecord {
            platform: Some("YouTube".to_string()),
            ..Default::default()
        };
        assert_eq!(partial.phase(), SlotPhase::Collecting);

        let invalid_email = LeadRecord {
            name: Some("John".to_string()),
            email: Some("john@invalid".to_string()),
            platform: Some("YouTube".to_string()),
        };
        assert_eq!(invalid_email.phase(), SlotPhase::Collecting);

        let complete = LeadRecord {
            name: Some("John".to_string()),
            email: Some("john@example.com".to_string()),
            platform: Some("YouTube".to_string()),
        };
        assert_eq!(complete.phase(), SlotPhase::Complete);
    }

    #[test]
    fn completed_returns_all_fields() {
        let lead = LeadRecord {
            name: Some("John Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            platform: Some("YouTube".to_string()),
        };
        let completed = lead.completed().unwrap();
        assert_eq!(completed.name, "John Doe");
        assert_eq!(completed.email, "john.doe@example.com");
        assert_eq!(completed.platform, "YouTube");
    }

    #[test]
    fn serde_round_trip() {
        let lead = LeadRecord {
            name: Some("John".to_string()),
            email: None,
            platform: Some("Twitch".to_string()),
        };
        let json = serde_json::to_string(&lead).unwrap();
        let parsed: LeadRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lead);
    }
}
