//! Client-side crisis language detection.
//!
//! The detector is a fast local safety net: it runs before the backend is
//! contacted, so the crisis alert fires even when the network never answers.
//! Matching is case-insensitive substring containment against a fixed list of
//! phrases. Phrase selection alone determines what matches; there is no fuzzy
//! matching.

/// Version of [`CRISIS_PHRASES`]. Bump whenever the list changes.
pub const CRISIS_PHRASES_VERSION: u32 = 1;

/// Lowercase phrases that indicate possible self-harm risk.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "don't want to live",
    "self harm",
    "hurt myself",
    "cutting myself",
    "overdose",
];

/// A way to reach immediate help, shown alongside the crisis alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisContact {
    /// Who answers.
    pub name: &'static str,
    /// How to reach them.
    pub reach: &'static str,
}

/// Contacts displayed while the crisis alert is visible.
pub const CRISIS_CONTACTS: &[CrisisContact] = &[
    CrisisContact {
        name: "National Suicide Prevention Lifeline",
        reach: "call 988",
    },
    CrisisContact {
        name: "Crisis Text Line",
        reach: "text HOME to 741741",
    },
    CrisisContact {
        name: "Emergency services",
        reach: "call 911 or go to your nearest emergency room",
    },
];

/// Returns true if any of [`CRISIS_PHRASES`] occurs in `text`, ignoring case.
///
/// Typographic apostrophes are folded to ASCII first so that "don’t want to
/// live" typed on a phone keyboard still matches.
pub fn scan(text: &str) -> bool {
    let normalized = text.to_lowercase().replace('\u{2019}', "'");
    CRISIS_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
}
