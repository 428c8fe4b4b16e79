//! Name casing.

/// Upper-cases a name using full Unicode case mapping (`ß` becomes `SS`).
pub fn upper_case_name(value: &str) -> String {
    value.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_case() {
        assert_eq!(upper_case_name("Monkey Alberto"), "MONKEY ALBERTO");
        assert_eq!(upper_case_name("renée o'brien"), "RENÉE O'BRIEN");
    }

    #[test]
    fn test_expanding_mapping() {
        assert_eq!(upper_case_name("Straße"), "STRASSE");
    }
}
