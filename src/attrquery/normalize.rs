//! Canonical name normalization.
//!
//! Registered values are looked up through a canonical name derived from the
//! label a data provider uses (e.g. `"AIA"` → `aia`). Canonical names:
//! - Contain only lowercase ASCII letters and digits
//! - Never start with a digit (a leading digit is spelled out)
//! - Map the lone wildcard `*` to `all`
//!
//! Normalization never fails. Labels made entirely of punctuation or non-ASCII
//! characters normalize to an empty string; callers decide what to do with
//! those.

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Normalizes a human-readable label into an accessor-safe canonical name.
///
/// # Examples
/// ```
/// use attrquery::normalize::normalize;
///
/// assert_eq!(normalize("AIA"), "aia");
/// assert_eq!(normalize("SOHO/EIT"), "sohoeit");
/// assert_eq!(normalize("*"), "all");
/// assert_eq!(normalize("1600"), "one600");
/// assert_eq!(normalize("~~##"), "");
/// ```
pub fn normalize(original: &str) -> String {
    let trimmed = original.trim();
    if trimmed == "*" {
        return "all".to_string();
    }

    let mut name: String = trimmed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect();

    if let Some(digit) = name.chars().next().and_then(|ch| ch.to_digit(10)) {
        name.replace_range(..1, DIGIT_WORDS[digit as usize]);
    }

    name
}

/// Checks whether `name` is already in canonical form.
pub fn is_canonical(name: &str) -> bool {
    !name.is_empty() && normalize(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("AIA"), "aia");
        assert_eq!(normalize("HMI"), "hmi");
        assert_eq!(normalize("MiXeD"), "mixed");
    }

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(
            normalize("_!£!THIS_NAME!\"!ISSPECIAL~~##"),
            "thisnameisspecial"
        );
        assert_eq!(normalize("SOHO / EIT"), "sohoeit");
        assert_eq!(normalize("e-CALLISTO"), "ecallisto");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  lasco  "), "lasco");
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(normalize("*"), "all");
        assert_eq!(normalize(" * "), "all");
        assert_eq!(normalize("**"), "");
    }

    #[test]
    fn test_leading_digit_is_spelled_out() {
        assert_eq!(normalize("1600"), "one600");
        assert_eq!(normalize("0"), "zero");
        assert_eq!(normalize("9a"), "ninea");
        assert_eq!(normalize("_2B"), "twob");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(normalize("Ångström"), "ngstrm");
        assert_eq!(normalize("日本"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for label in ["AIA", "1600", "*", "_!£!THIS_NAME!", "SOHO/EIT"] {
            let once = normalize(label);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("aia"));
        assert!(is_canonical("one600"));
        assert!(!is_canonical("AIA"));
        assert!(!is_canonical("1600"));
        assert!(!is_canonical(""));
    }
}
