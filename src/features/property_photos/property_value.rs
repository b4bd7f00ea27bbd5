//! Composite property-value parsing.

use crate::shared::constants::PROPERTY_VALUE_DELIMITER;

/// Extract the identity key of a composite property value: the trimmed first
/// `|`-delimited segment. Returns `None` for empty or malformed values;
/// an empty identity key is never considered valid.
pub fn identity_key(value: &str) -> Option<&str> {
    let first = value
        .split(PROPERTY_VALUE_DELIMITER)
        .next()
        .unwrap_or("")
        .trim();

    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}

/// The finish/color descriptor segments following the identity key,
/// trimmed, empties dropped. Display-only.
pub fn descriptors(value: &str) -> Vec<&str> {
    value
        .split(PROPERTY_VALUE_DELIMITER)
        .skip(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_first_segment() {
        assert_eq!(
            identity_key("DomeoDoors_Base_1|Эмаль|Белый"),
            Some("DomeoDoors_Base_1")
        );
        assert_eq!(
            identity_key("Дверь Гладкое ДГ|Эмаль|Белый"),
            Some("Дверь Гладкое ДГ")
        );
    }

    #[test]
    fn test_identity_key_trims() {
        assert_eq!(identity_key("  H204 | Хром"), Some("H204"));
    }

    #[test]
    fn test_identity_key_without_delimiter() {
        // A value without a delimiter is its own identity key
        assert_eq!(identity_key("DomeoDoors_Base_1"), Some("DomeoDoors_Base_1"));
    }

    #[test]
    fn test_identity_key_empty_forms() {
        assert_eq!(identity_key(""), None);
        assert_eq!(identity_key("   "), None);
        assert_eq!(identity_key("|Эмаль|Белый"), None);
        assert_eq!(identity_key("  |Эмаль"), None);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(
            descriptors("DomeoDoors_Base_1|Эмаль|Белый"),
            vec!["Эмаль", "Белый"]
        );
        assert_eq!(descriptors("DomeoDoors_Base_1"), Vec::<&str>::new());
        assert_eq!(descriptors("X| |Белый"), vec!["Белый"]);
    }
}
