//! Serial number formatting
//!
//! Reshapes raw keystroke input into the canonical `XX-XXXXXX` form. Called by
//! the edit handler for every change of a serial number field.

/// Maximum formatted length: 2 prefix characters, separator, 6 body characters
pub const SERIAL_MAX_LEN: usize = 9;

/// Number of characters before the separator
const PREFIX_LEN: usize = 2;

const SEPARATOR: char = '-';

/// Format raw input into the canonical serial shape.
///
/// `previous` is the value the field held before this edit. When it ended
/// right after the separator (`"XX-"`) and the new input is two characters
/// long, the edit was a backspace over the separator, so the separator is
/// not re-inserted.
pub fn format_serial(raw: &str, previous: &str) -> String {
    if previous.chars().count() == PREFIX_LEN + 1 && raw.chars().count() == PREFIX_LEN {
        return canonical_chars(raw).take(PREFIX_LEN).collect();
    }

    // Only ASCII remains after this, so byte offsets are char offsets
    let cleaned: String = canonical_chars(raw).collect();

    let mut formatted = if cleaned.len() > PREFIX_LEN {
        let (prefix, body) = cleaned.split_at(PREFIX_LEN);
        format!("{prefix}{SEPARATOR}{body}")
    } else {
        cleaned
    };

    formatted.truncate(SERIAL_MAX_LEN);
    formatted
}

fn canonical_chars(raw: &str) -> impl Iterator<Item = char> + '_ {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use regex::Regex;

    #[test]
    fn test_inserts_separator_after_prefix() {
        assert_eq!(format_serial("ab1", ""), "AB-1");
        assert_eq!(format_serial("ab123456", ""), "AB-123456");
        assert_eq!(format_serial("AB", "A"), "AB");
        assert_eq!(format_serial("a", ""), "A");
        assert_eq!(format_serial("", "A"), "");
    }

    #[test]
    fn test_strips_non_alphanumerics() {
        assert_eq!(format_serial("a b-1_2.3", ""), "AB-123");
        assert_eq!(format_serial("--!!", ""), "");
    }

    #[test]
    fn test_truncates_to_nine_characters() {
        assert_eq!(format_serial("AB-1234567890", "AB-123456"), "AB-123456");
        assert_eq!(format_serial("abcdefghijklmnop", ""), "AB-CDEFGH");
    }

    #[test]
    fn test_backspace_across_separator() {
        assert_eq!(format_serial("AB", "AB-"), "AB");
        assert_eq!(format_serial("ab", "AB-"), "AB");
    }

    #[test]
    fn test_typing_into_separator_position_keeps_shape() {
        // "AB-" then a body character is typed
        assert_eq!(format_serial("AB-1", "AB-"), "AB-1");
        // Deleting a body character that leaves "AB-"
        assert_eq!(format_serial("AB-", "AB-1"), "AB");
    }

    #[test]
    fn test_canonical_value_is_stable() {
        let canonical = "AB-123456";
        assert_eq!(format_serial(canonical, canonical), canonical);

        let once = format_serial("zz9x8y7w", "");
        assert_eq!(format_serial(&once, &once), once);
    }

    #[test]
    fn test_random_input_always_yields_serial_shape() {
        let shape = Regex::new(r"^[A-Z0-9]{0,2}(-[A-Z0-9]{0,6})?$").unwrap();
        let alphabet: Vec<char> = "abcXYZ0189-_ !éß\t".chars().collect();
        let mut rng = StdRng::seed_from_u64(0x5e71a1);

        for _ in 0..2_000 {
            let raw: String = (0..rng.gen_range(0..16))
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let previous: String = (0..rng.gen_range(0..5))
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();

            let formatted = format_serial(&raw, &previous);
            assert!(
                shape.is_match(&formatted),
                "{raw:?} after {previous:?} formatted to {formatted:?}"
            );
            assert!(formatted.len() <= SERIAL_MAX_LEN);
        }
    }
}
