//! Point-based secret strength heuristic.
//!
//! | Check | Points |
//! |-------|--------|
//! | length >= 12 / >= 8 / >= 6 | +25 / +15 / +5 |
//! | uppercase, lowercase, digit, symbol present | +20 each |
//! | three identical characters in a row | -10 |
//! | ascending run such as `abc` or `123` | -10 |
//! | exact match on the common-password list | score forced to 0 |
//!
//! The total is clamped to `0..=100` and classified with
//! [`crate::classify::classify`].

use bulwark_core::{ScoreReport, Verdict};

use crate::classify::classify;

/// Passwords that score 0 no matter how they are composed.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "qwerty",
    "admin",
    "welcome",
    "password123",
];

/// Ascending three-character runs, matched case-insensitively.
const SEQUENCES: &[&str] = &[
    "abc", "bcd", "cde", "def", "efg", "123", "234", "345", "456", "567", "678", "789",
];

const LENGTH_STRONG: usize = 12;
const LENGTH_FAIR: usize = 8;
const LENGTH_SHORT: usize = 6;

const CLASS_BONUS: i32 = 20;
const PATTERN_PENALTY: i32 = 10;

/// Score a secret.
///
/// The empty string is not a weak secret but the absence of one; it yields
/// [`ScoreReport::no_input`]. Length is measured in characters.
#[must_use]
pub fn score(secret: &str) -> ScoreReport {
    if secret.is_empty() {
        return ScoreReport::no_input();
    }

    let mut points: i32 = 0;
    let mut feedback = Vec::new();

    let length = secret.chars().count();
    if length >= LENGTH_STRONG {
        points += 25;
    } else if length >= LENGTH_FAIR {
        points += 15;
        feedback.push("Consider using a longer password (12+ characters)".to_string());
    } else if length >= LENGTH_SHORT {
        points += 5;
        feedback.push("Password is too short (aim for 12+ characters)".to_string());
    } else {
        feedback.push("Password is extremely short and easily crackable".to_string());
    }

    let classes: [(fn(char) -> bool, &str); 4] = [
        (|c: char| c.is_ascii_uppercase(), "Add uppercase letters"),
        (|c: char| c.is_ascii_lowercase(), "Add lowercase letters"),
        (|c: char| c.is_ascii_digit(), "Add numbers"),
        (|c: char| !c.is_ascii_alphanumeric(), "Add special characters (!@#$%^&*)"),
    ];
    for (present, advice) in classes {
        if secret.chars().any(present) {
            points += CLASS_BONUS;
        } else {
            feedback.push(advice.to_string());
        }
    }

    if has_repeated_run(secret) {
        points -= PATTERN_PENALTY;
        feedback.push("Avoid repeated characters (e.g., \"aaa\")".to_string());
    }

    let lowered = secret.to_lowercase();
    if SEQUENCES.iter().any(|seq| lowered.contains(seq)) {
        points -= PATTERN_PENALTY;
        feedback.push("Avoid sequential characters (e.g., \"abc\", \"123\")".to_string());
    }

    if is_common_password(secret) {
        points = 0;
        feedback.push("This is a commonly used password".to_string());
    }

    // Clamped to 0..=100, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = points.clamp(0, 100) as u8;

    ScoreReport {
        score,
        feedback,
        status: classify(score),
        verdict: Verdict::Assessed,
    }
}

/// Returns true if the secret is on the common-password list (case-insensitive).
#[must_use]
pub fn is_common_password(secret: &str) -> bool {
    let lowered = secret.to_lowercase();
    COMMON_PASSWORDS.contains(&lowered.as_str())
}

/// Three or more identical characters in a row.
fn has_repeated_run(secret: &str) -> bool {
    let chars: Vec<char> = secret.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulwark_core::Status;

    #[test]
    fn common_passwords_score_zero() {
        for secret in ["password", "PASSWORD", "Password123", "qwerty", "Admin", "123456", "welcome"] {
            let report = score(secret);
            assert_eq!(report.score, 0, "{secret} should be denied");
            assert_eq!(report.status, Status::Critical);
            assert_eq!(
                report.feedback.last().map(String::as_str),
                Some("This is a commonly used password")
            );
        }
    }

    #[test]
    fn mixed_nine_chars_is_secure_despite_sequence() {
        // 15 (length) + 80 (all classes) - 10 ("abc"/"123" run)
        let report = score("Abc12345!");
        assert_eq!(report.score, 85);
        assert_eq!(report.status, Status::Secure);
        assert_eq!(
            report.feedback,
            vec![
                "Consider using a longer password (12+ characters)".to_string(),
                "Avoid sequential characters (e.g., \"abc\", \"123\")".to_string(),
            ]
        );
    }

    #[test]
    fn repeated_lowercase_is_critical() {
        // 15 (length) + 20 (lowercase) - 10 (repeat)
        let report = score("aaaaaaaa");
        assert_eq!(report.score, 25);
        assert_eq!(report.status, Status::Critical);
        assert!(report.feedback.iter().any(|f| f.contains("repeated")));
        assert!(report.feedback.contains(&"Add uppercase letters".to_string()));
    }

    #[test]
    fn empty_is_no_input_not_weak() {
        let empty = score("");
        assert!(empty.is_no_input());
        assert_eq!(empty.score, 0);
        assert!(empty.feedback.is_empty());
        assert_ne!(empty.status, Status::Critical);

        let weak = score("a");
        assert!(!weak.is_no_input());
        assert_eq!(weak.status, Status::Critical);
    }

    #[test]
    fn long_varied_secret_scores_full_marks() {
        let report = score("Tr0ub4dor&Horse!");
        assert_eq!(report.score, 100);
        assert!(report.feedback.is_empty());
    }

    #[test]
    fn both_penalties_stack() {
        // 25 + 20 (lower) + 20 (digit) - 10 - 10
        let report = score("zzzqqq123xyzw");
        assert_eq!(report.score, 45);
        assert_eq!(report.status, Status::Warning);
    }

    #[test]
    fn symbols_include_non_ascii() {
        let with = score("Zq9\u{e9}Zq9\u{e9}");
        let without = score("Zq9xZq9x");
        assert_eq!(with.score, without.score + 20);
    }

    #[test]
    fn scores_are_deterministic() {
        assert_eq!(score("S0me-Passphrase"), score("S0me-Passphrase"));
    }
}
