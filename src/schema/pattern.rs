use std::fmt;

use regex::Regex;

use crate::error::PatternError;
use crate::value::Value;

/// Regex matched against strings and symbols. Other values never match.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Regex::new(source)
            .map(Pattern)
            .map_err(|source_error| PatternError {
                pattern: source.to_string(),
                source: source_error,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &Value) -> bool {
        value.as_text().is_some_and(|text| self.0.is_match(text))
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_strings_and_symbols_only() {
        let plate = Pattern::new(r"^\d[A-Z]{3}\d{3}$").unwrap();
        assert!(plate.is_match(&Value::from("2JGJ683")));
        assert!(plate.is_match(&Value::sym("2JGJ683")));
        assert!(!plate.is_match(&Value::from("shtoo")));
        assert!(!plate.is_match(&Value::from(2)));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
