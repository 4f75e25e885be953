//! Pure input validators shared by the interactive and direct entry paths.
//!
//! Every function here is a side-effect-free predicate. Optional-field
//! validators treat the empty string as valid so a blank reply can mean
//! "leave unset".

use chrono::NaiveDate;

/// Maximum length of an issue summary.
pub const MAX_SUMMARY_LENGTH: usize = 255;

/// Validates an ISO calendar date (`YYYY-MM-DD`).
///
/// Empty input is valid (optional field skip). Anything else must parse as an
/// exact calendar date, so "2025-02-30" and month 13 are rejected.
pub fn is_valid_date(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// Validates a conventional `local@domain.tld` email shape.
///
/// Empty input is valid (optional field skip).
pub fn is_valid_email(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty() || tld.len() < 2 {
        return false;
    }
    host.chars().all(|c| c.is_ascii_alphanumeric() || ".-".contains(c))
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validates an issue key such as `TJ-123`.
///
/// One or more uppercase letters, a hyphen, one or more digits. Callers
/// normalize to uppercase before storing; this check is applied to the
/// uppercased input.
pub fn is_valid_issue_key(text: &str) -> bool {
    let text = text.trim().to_uppercase();
    let Some((project, number)) = text.split_once('-') else {
        return false;
    };
    !project.is_empty()
        && project.chars().all(|c| c.is_ascii_uppercase())
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

/// Validates an issue summary: non-empty and within the length cap.
pub fn is_valid_summary(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().count() <= MAX_SUMMARY_LENGTH
}

/// Normalizes a label token: trimmed, lowercased, spaces replaced by hyphens.
pub fn normalize_label(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod dates {
        use super::*;

        #[test]
        fn empty_is_valid() {
            assert!(is_valid_date(""));
            assert!(is_valid_date("   "));
        }

        #[test]
        fn accepts_exact_calendar_dates() {
            assert!(is_valid_date("2025-09-01"));
            assert!(is_valid_date("2024-02-29")); // leap day
            assert!(is_valid_date(" 2025-12-31 "));
        }

        #[test]
        fn rejects_impossible_dates() {
            assert!(!is_valid_date("2025-02-30"));
            assert!(!is_valid_date("2025-13-01"));
            assert!(!is_valid_date("2023-02-29")); // not a leap year
        }

        #[test]
        fn rejects_other_formats() {
            assert!(!is_valid_date("01-09-2025"));
            assert!(!is_valid_date("2025/09/01"));
            assert!(!is_valid_date("Sep 1, 2025"));
            assert!(!is_valid_date("tomorrow"));
        }

        proptest! {
            #[test]
            fn accepts_all_real_dates(days in 0i64..20000) {
                let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
                    + chrono::Duration::days(days);
                prop_assert!(is_valid_date(&date.format("%Y-%m-%d").to_string()));
            }

            #[test]
            fn rejects_arbitrary_words(s in "[a-zA-Z ]{1,20}") {
                prop_assert!(!is_valid_date(&s) || s.trim().is_empty());
            }
        }
    }

    mod emails {
        use super::*;

        #[test]
        fn empty_is_valid() {
            assert!(is_valid_email(""));
        }

        #[test]
        fn accepts_conventional_addresses() {
            assert!(is_valid_email("tracy.ctee@gmail.com"));
            assert!(is_valid_email("dev+jira@example.co.uk"));
            assert!(is_valid_email("a_b%c@sub.domain.org"));
        }

        #[test]
        fn rejects_malformed_addresses() {
            assert!(!is_valid_email("not-an-email"));
            assert!(!is_valid_email("@example.com"));
            assert!(!is_valid_email("user@"));
            assert!(!is_valid_email("user@domain"));
            assert!(!is_valid_email("user@domain.c"));
            assert!(!is_valid_email("user@@domain.com"));
            assert!(!is_valid_email("user@domain.123"));
        }
    }

    mod issue_keys {
        use super::*;

        #[test]
        fn accepts_project_dash_number() {
            assert!(is_valid_issue_key("TJ-123"));
            assert!(is_valid_issue_key("MFLP-3"));
            assert!(is_valid_issue_key("tj-123")); // normalized to uppercase first
        }

        #[test]
        fn rejects_everything_else() {
            assert!(!is_valid_issue_key("TJ123"));
            assert!(!is_valid_issue_key("TJ-"));
            assert!(!is_valid_issue_key("-123"));
            assert!(!is_valid_issue_key("TJ-12a"));
            assert!(!is_valid_issue_key(""));
            assert!(!is_valid_issue_key("T J-123"));
        }
    }

    mod summaries {
        use super::*;

        #[test]
        fn rejects_empty() {
            assert!(!is_valid_summary(""));
            assert!(!is_valid_summary("   "));
        }

        #[test]
        fn accepts_up_to_the_cap() {
            assert!(is_valid_summary("Fix DB timeout"));
            assert!(is_valid_summary(&"x".repeat(MAX_SUMMARY_LENGTH)));
        }

        #[test]
        fn rejects_over_the_cap() {
            assert!(!is_valid_summary(&"x".repeat(MAX_SUMMARY_LENGTH + 1)));
        }
    }

    mod label_normalization {
        use super::*;

        #[test]
        fn lowercases_and_hyphenates() {
            assert_eq!(normalize_label("  Front End "), "front-end");
            assert_eq!(normalize_label("API"), "api");
        }

        proptest! {
            #[test]
            fn normalization_is_idempotent(s in "[a-zA-Z ]{0,30}") {
                let once = normalize_label(&s);
                prop_assert_eq!(normalize_label(&once), once);
            }
        }
    }
}
