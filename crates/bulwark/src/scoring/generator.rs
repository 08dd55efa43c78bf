//! Random password generation.

use rand::Rng;

use bulwark_core::{BulwarkError, Result};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Shortest password the generator will produce
pub const MIN_LENGTH: usize = 4;
/// Longest password the generator will produce
pub const MAX_LENGTH: usize = 128;
/// Length used when the caller has no preference
pub const DEFAULT_LENGTH: usize = 16;

/// Generate a password by drawing each character uniformly from the
/// letter and digit alphabet, plus symbols when `include_symbols` is set.
///
/// Character classes are not guaranteed to appear; score the result if
/// that matters.
pub fn generate_password(length: usize, include_symbols: bool) -> Result<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(BulwarkError::InvalidLength {
            length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        });
    }

    let mut alphabet: Vec<char> = UPPERCASE
        .chars()
        .chain(LOWERCASE.chars())
        .chain(DIGITS.chars())
        .collect();
    if include_symbols {
        alphabet.extend(SYMBOLS.chars());
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect())
}
