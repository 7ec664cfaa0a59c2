use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
}

pub const DEFAULT_MAX_INPUT_LEN: usize = 500;

/// Strips markup and control characters, collapses whitespace
/// and truncates the result to at most `max_len` characters.
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    let without_markup = MARKUP_RE.replace_all(input, " ");
    without_markup
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_len)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Formats Indian mobile numbers as `+91 XXXXX XXXXX`.
///
/// Accepts an optional `+91`/`91`/`0` prefix and arbitrary
/// separators. Returns `None` if no valid 10-digit number remains.
pub fn format_phone_number(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => digits.as_str(),
        11 => digits.strip_prefix('0')?,
        12 => digits.strip_prefix("91")?,
        _ => return None,
    };
    if !national.starts_with(['6', '7', '8', '9']) {
        return None;
    }
    Some(format!("+91 {} {}", &national[..5], &national[5..]))
}

/// Indian postal codes (PIN) consist of exactly 6 digits.
pub fn is_valid_postal_code(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Removes whitespace and separators, e.g. `"560 001"` -> `"560001"`.
pub fn normalize_postal_code(s: &str) -> Option<String> {
    let normalized: String = s
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '-'))
        .collect();
    is_valid_postal_code(&normalized).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_markup_and_whitespace() {
        assert_eq!(
            sanitize_input("  <b>Best</b>   dosa\tin\n town<script>x</script> ", 100),
            "Best dosa in town x"
        );
        assert_eq!(sanitize_input("a\u{0007}b", 100), "a b");
        assert_eq!(sanitize_input("", 100), "");
    }

    #[test]
    fn sanitize_caps_length() {
        assert_eq!(sanitize_input("abcdef", 3), "abc");
        assert_eq!(sanitize_input("ab cdef", 3), "ab");
        assert_eq!(sanitize_input("ಬೆಂಗಳೂರು", 2).chars().count(), 2);
    }

    #[test]
    fn format_indian_phone_numbers() {
        assert_eq!(format_phone_number("9876543210").unwrap(), "+91 98765 43210");
        assert_eq!(format_phone_number("+91 98765-43210").unwrap(), "+91 98765 43210");
        assert_eq!(format_phone_number("09876543210").unwrap(), "+91 98765 43210");
        assert!(format_phone_number("1234567890").is_none());
        assert!(format_phone_number("98765").is_none());
        assert!(format_phone_number("449876543210").is_none());
    }

    #[test]
    fn postal_codes() {
        assert!(is_valid_postal_code("560001"));
        assert!(!is_valid_postal_code("56000"));
        assert!(!is_valid_postal_code("5600011"));
        assert!(!is_valid_postal_code("56000a"));
        assert_eq!(normalize_postal_code(" 560 001 ").unwrap(), "560001");
        assert_eq!(normalize_postal_code("560-001").unwrap(), "560001");
        assert!(normalize_postal_code("56 00").is_none());
    }
}
