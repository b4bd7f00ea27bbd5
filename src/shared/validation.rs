use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating category slugs
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "interior-doors", "handles", "door-accessories"
    /// - Invalid: "-doors", "doors-", "door--x", "Doors", "door_x"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating canonical model codes stored in properties_data
    /// - Valid: "DomeoDoors_Base_1", "H204", "Alfa_2"
    /// - Invalid: "", "Дверь ДГ", "code with spaces", "a|b"
    pub static ref MODEL_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("interior-doors"));
        assert!(SLUG_REGEX.is_match("handles"));
        assert!(SLUG_REGEX.is_match("door-accessories-2"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-doors")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("doors-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("door--x")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Doors")); // uppercase
        assert!(!SLUG_REGEX.is_match("door_x")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_model_code_regex() {
        assert!(MODEL_CODE_REGEX.is_match("DomeoDoors_Base_1"));
        assert!(MODEL_CODE_REGEX.is_match("H204"));
        assert!(MODEL_CODE_REGEX.is_match("Alfa-2"));
        assert!(!MODEL_CODE_REGEX.is_match(""));
        assert!(!MODEL_CODE_REGEX.is_match("Дверь ДГ"));
        assert!(!MODEL_CODE_REGEX.is_match("code with spaces"));
        assert!(!MODEL_CODE_REGEX.is_match("_leading"));
    }
}
