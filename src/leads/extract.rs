//! Free-text field extraction for lead capture.
//!
//! Three independent extractions run over the same raw message. Each field
//! has a fixed, priority-ordered rule list; the first rule that matches and
//! yields an acceptable candidate wins, and later rules are not tried.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fields pulled out of a single message. No memory across turns; running
/// the extractor twice on the same text yields the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub email: Option<String>,
    pub platform: Option<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.platform.is_none()
    }
}

/// Platform keywords in priority order, with canonical display names.
/// `x` is an alias for Twitter.
const PLATFORM_KEYWORDS: &[(&str, &str)] = &[
    ("youtube", "YouTube"),
    ("instagram", "Instagram"),
    ("tiktok", "TikTok"),
    ("facebook", "Facebook"),
    ("twitter", "Twitter"),
    ("x", "Twitter"),
    ("linkedin", "LinkedIn"),
    ("twitch", "Twitch"),
    ("vimeo", "Vimeo"),
    ("snapchat", "Snapchat"),
];

/// Longest accepted name candidate.
const MAX_NAME_LEN: usize = 50;

/// A platform keyword with its compiled word-bounded pattern.
struct PlatformRule {
    pattern: Regex,
    canonical: &'static str,
}

/// A name-extraction rule; group 1 captures the candidate.
struct NameRule {
    pattern: Regex,
}

/// Compiled extraction rules. Build once, reuse for every message.
pub struct Extractor {
    email: Regex,
    platforms: Vec<PlatformRule>,
    names: Vec<NameRule>,
}

impl Extractor {
    pub fn new() -> Self {
        let email = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();

        // Word-bounded so the single-letter `x` alias cannot fire inside a
        // word (or an email domain like example.com).
        let platforms = PLATFORM_KEYWORDS
            .iter()
            .copied()
            .map(|(keyword, canonical)| PlatformRule {
                pattern: Regex::new(&format!(r"(?i)\b{keyword}\b")).unwrap(),
                canonical,
            })
            .collect();

        // Ordered: introduction phrase, explicit label, capitalized token at
        // message start, bare First Last pair. The lead-in phrases are
        // case-insensitive; the captured candidate must be capitalized.
        let names = [
            r"\b(?i:i'?m|i am|my name is|this is|call me|it'?s)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
            r"(?i:name)[:\s]+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
            r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)(?:\s|$)",
            r"([A-Z][a-z]+\s+[A-Z][a-z]+)",
        ]
        .into_iter()
        .map(|pattern| NameRule {
            pattern: Regex::new(pattern).unwrap(),
        })
        .collect();

        Self {
            email,
            platforms,
            names,
        }
    }

    /// Extract all three fields from one message. Pure: the extractions are
    /// independent and one failing does not affect the others.
    pub fn extract(&self, message: &str) -> ExtractionResult {
        ExtractionResult {
            name: self.extract_name(message),
            email: self.extract_email(message),
            platform: self.extract_platform(message),
        }
    }

    /// First email-shaped substring in the message.
    fn extract_email(&self, message: &str) -> Option<String> {
        self.email.find(message).map(|m| m.as_str().to_string())
    }

    /// First platform keyword in enumeration order. At most one platform per
    /// message; rules after the first hit are not consulted.
    fn extract_platform(&self, message: &str) -> Option<String> {
        self.platforms
            .iter()
            .find(|rule| rule.pattern.is_match(message))
            .map(|rule| rule.canonical.to_string())
    }

    fn extract_name(&self, message: &str) -> Option<String> {
        for rule in &self.names {
            let Some(captures) = rule.pattern.captures(message) else {
                continue;
            };
            let Some(candidate) = captures.get(1) else {
                continue;
            };
            let candidate = candidate.as_str().trim();
            if self.accept_name(candidate) {
                return Some(candidate.to_string());
            }
        }
        None
    }

    fn accept_name(&self, candidate: &str) -> bool {
        !candidate.is_empty()
            && candidate.len() < MAX_NAME_LEN
            && !candidate.contains('@')
            && !is_platform_keyword(candidate)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A candidate that is itself a platform keyword is never a name; this pins
/// the collision between capitalized platform names and the
/// capitalized-token name rules.
fn is_platform_keyword(candidate: &str) -> bool {
    PLATFORM_KEYWORDS.iter().copied().any(|(keyword, canonical)| {
        candidate.eq_ignore_ascii_case(keyword) || candidate.eq_ignore_ascii_case(canonical)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(message: &str) -> ExtractionResult {
        Extractor::new().extract(message)
    }

    // ── Email ───────────────────────────────────────────────────────

    #[test]
    fn email_embedded_in_text() {
        let result = extract("you can reach me at jane_doe+leads@mail.example.org, thanks");
        assert_eq!(result.email.as_deref(), Some("jane_doe+leads@mail.example.org"));
    }

    #[test]
    fn email_without_tld_is_not_extracted() {
        assert_eq!(extract("my email is john.doe@invalid").email, None);
    }

    #[test]
    fn first_email_wins() {
        let result = extract("a@b.com or c@d.com");
        assert_eq!(result.email.as_deref(), Some("a@b.com"));
    }

    // ── Platform ────────────────────────────────────────────────────

    #[test]
    fn each_platform_keyword_maps_to_canonical_name() {
        let cases = [
            ("I post on youtube", "YouTube"),
            ("mostly Instagram reels", "Instagram"),
            ("tiktok creator here", "TikTok"),
            ("we run facebook ads", "Facebook"),
            ("my twitter following", "Twitter"),
            ("I'm big on X", "Twitter"),
            ("b2b content on LinkedIn", "LinkedIn"),
            ("I stream on twitch", "Twitch"),
            ("vimeo portfolio", "Vimeo"),
            ("snapchat stories", "Snapchat"),
        ];
        for (message, expected) in cases {
            assert_eq!(
                extract(message).platform.as_deref(),
                Some(expected),
                "message: {message}"
            );
        }
    }

    #[test]
    fn platform_priority_order_wins() {
        // Both present: the earlier keyword in the enumeration wins.
        let result = extract("I cross-post from Instagram to YouTube");
        assert_eq!(result.platform.as_deref(), Some("YouTube"));
    }

    #[test]
    fn x_alias_requires_word_boundaries() {
        assert_eq!(extract("contact me at john@example.com").platform, None);
        assert_eq!(extract("my next experiment").platform, None);
        assert_eq!(extract("find me on x").platform.as_deref(), Some("Twitter"));
    }

    // ── Name ────────────────────────────────────────────────────────

    #[test]
    fn introduction_phrases() {
        assert_eq!(extract("Hi, I'm Jane Doe").name.as_deref(), Some("Jane Doe"));
        assert_eq!(extract("my name is John Doe").name.as_deref(), Some("John Doe"));
        assert_eq!(extract("you can call me Alice").name.as_deref(), Some("Alice"));
        assert_eq!(extract("It's Bob").name.as_deref(), Some("Bob"));
    }

    #[test]
    fn explicit_name_label() {
        assert_eq!(extract("name: Carol Smith").name.as_deref(), Some("Carol Smith"));
        assert_eq!(extract("Name Dave").name.as_deref(), Some("Dave"));
    }

    #[test]
    fn capitalized_token_at_start() {
        assert_eq!(extract("John here, checking in").name.as_deref(), Some("John"));
        assert_eq!(extract("Jane Doe").name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn lowercase_start_is_not_a_name() {
        assert_eq!(extract("hello there").name, None);
        assert_eq!(extract("sure thing").name, None);
    }

    #[test]
    fn bare_first_last_pair() {
        let result = extract("please register John Doe for the trial");
        assert_eq!(result.name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn phrase_rule_requires_word_boundary() {
        // The "im" inside another word must not trigger the introduction rule.
        assert_eq!(extract("we swim Mondays").name, None);
    }

    #[test]
    fn candidates_with_at_sign_or_overlong_are_rejected() {
        assert_eq!(extract("I'm J@ne").name, None);
        // Candidate exceeds the length cap; no later rule produces another.
        let long = format!("call me A{} B{}", "a".repeat(30), "b".repeat(30));
        assert_eq!(extract(&long).name, None);
    }

    #[test]
    fn platform_spelled_as_a_name_is_a_platform_not_a_name() {
        let result = extract("Youtube");
        assert_eq!(result.platform.as_deref(), Some("YouTube"));
        assert_eq!(result.name, None);
    }

    // ── Cross-field behavior ────────────────────────────────────────

    #[test]
    fn email_only_message_yields_only_email() {
        let result = extract("john.doe@example.com");
        assert_eq!(result.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(result.name, None);
        assert_eq!(result.platform, None);
    }

    #[test]
    fn all_three_fields_from_one_message() {
        let result = extract("I'm Jane Doe, jane@creator.tv, mostly on TikTok");
        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.email.as_deref(), Some("jane@creator.tv"));
        assert_eq!(result.platform.as_deref(), Some("TikTok"));
    }

    #[test]
    fn empty_message_extracts_nothing() {
        let result = extract("");
        assert!(result.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = Extractor::new();
        let message = "I'm Jane Doe, jane@creator.tv, mostly on TikTok";
        assert_eq!(extractor.extract(message), extractor.extract(message));
    }
}
