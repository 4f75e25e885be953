//! Keyword-based label inference.
//!
//! Derives topical labels from free-text descriptions by matching tokens
//! against a fixed vocabulary and scanning for a handful of compound phrases.
//! Deterministic for a given input; no learning, no external calls.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cap on the number of labels inferred from one description.
pub const MAX_INFERRED_LABELS: usize = 5;

/// Single-word vocabulary that makes good labels.
static KEYWORD_VOCABULARY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Programming / tech
        "api", "database", "frontend", "backend", "mobile", "web", "server",
        "authentication", "oauth", "login", "payment", "gateway", "security",
        "performance", "bug", "error", "timeout", "crash", "fix",
        // Priority / urgency
        "critical", "urgent", "important", "high", "medium", "low",
        // Components
        "ui", "ux", "design", "infrastructure", "devops", "testing",
        "deployment", "monitoring", "logging", "backup", "migration",
        // Business
        "user", "customer", "admin", "report", "analytics", "dashboard",
        "checkout", "cart", "wishlist", "profile", "settings", "notification",
    ]
    .into_iter()
    .collect()
});

/// Compound phrases mapped to canonical multi-word labels. Each label is
/// added when any of its trigger phrases appears in the text.
static COMPOUND_LABELS: &[(&str, &[&str])] = &[
    ("two-factor", &["two-factor", "two factor", "2fa"]),
    ("single-sign-on", &["single sign-on", "single sign on", "sso"]),
    ("real-time", &["real-time", "real time", "realtime"]),
    ("third-party", &["third-party", "third party"]),
    ("end-to-end", &["end-to-end", "end to end", "e2e"]),
];

/// Infers up to [`MAX_INFERRED_LABELS`] labels from a description.
///
/// Single-word matches come first, in the order they first appear in the
/// text; compound-phrase labels are appended afterwards if not already
/// present. The result is deduplicated and lowercase.
pub fn infer_labels(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    let lowered = description.to_lowercase();
    let mut labels: Vec<String> = Vec::new();

    for token in lowered.split(|c: char| !c.is_ascii_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        if KEYWORD_VOCABULARY.contains(token) && !labels.iter().any(|l| l == token) {
            labels.push(token.to_string());
        }
    }

    for (label, triggers) in COMPOUND_LABELS {
        if triggers.iter().any(|t| lowered.contains(t))
            && !labels.iter().any(|l| l == label)
        {
            labels.push((*label).to_string());
        }
    }

    labels.truncate(MAX_INFERRED_LABELS);
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_labels() {
        assert!(infer_labels("").is_empty());
        assert!(infer_labels("   ").is_empty());
    }

    #[test]
    fn matches_vocabulary_tokens_in_first_seen_order() {
        let labels = infer_labels("API timeout on login for mobile users");
        assert_eq!(labels, vec!["api", "timeout", "login", "mobile"]);
    }

    #[test]
    fn ignores_words_outside_the_vocabulary() {
        let labels = infer_labels("the quick brown fox jumps");
        assert!(labels.is_empty());
    }

    #[test]
    fn deduplicates_repeated_tokens() {
        let labels = infer_labels("login login login error");
        assert_eq!(labels, vec!["login", "error"]);
    }

    #[test]
    fn caps_at_five_labels() {
        let labels =
            infer_labels("api database frontend backend mobile web server security");
        assert_eq!(labels.len(), MAX_INFERRED_LABELS);
        assert_eq!(
            labels,
            vec!["api", "database", "frontend", "backend", "mobile"]
        );
    }

    #[test]
    fn compound_phrases_append_after_simple_tokens() {
        let labels = infer_labels("login fails with 2fa enabled");
        assert_eq!(labels, vec!["login", "two-factor"]);
    }

    #[test]
    fn compound_phrase_variants_map_to_canonical_label() {
        for text in ["needs real-time sync", "needs real time sync", "needs realtime sync"] {
            assert!(infer_labels(text).contains(&"real-time".to_string()), "{text}");
        }
    }

    #[test]
    fn compound_label_not_duplicated() {
        let labels = infer_labels("two-factor rollout, two factor everywhere");
        assert_eq!(
            labels.iter().filter(|l| *l == "two-factor").count(),
            1
        );
    }

    #[test]
    fn inference_is_deterministic_and_idempotent() {
        let text = "Critical API crash in checkout with third-party payment gateway";
        let first = infer_labels(text);
        let second = infer_labels(text);
        assert_eq!(first, second);
        assert!(first.len() <= MAX_INFERRED_LABELS);
    }

    #[test]
    fn case_is_normalized() {
        let labels = infer_labels("DATABASE Backup");
        assert_eq!(labels, vec!["database", "backup"]);
    }
}
