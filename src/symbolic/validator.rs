//! Structural checks run on the raw text before anything is parsed.
//! Checks run in a fixed order and the first failure is reported:
//! 1) the text is not empty and not longer than `MAX_INPUT_LENGTH`
//! 2) every sub-equation (split on ';') has exactly one top-level '='
//! 3) parentheses are balanced and nested at most `MAX_NESTING` deep
//! 4) only whitelisted characters are present
//! 5) no two operators from {+,-,*,/,^} follow each other
use crate::numerical::errors::EquationError;
use crate::symbolic::normalizer::normalize;
use crate::symbolic::utils::{check_brackets, check_nesting, find_char_positions_outside_brackets};
use log::debug;
use regex::Regex;
use std::fmt;

/// function names accepted on input; the normalizer rewrites them into symbols
const FUNCTION_WORDS: [&str; 2] = ["sqrt", "abs"];

/// longest accepted input, in characters
pub const MAX_INPUT_LENGTH: usize = 1000;

/// Text that passed validation and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, 'x' | 'y' | 'z' | 'X' | 'Y' | 'Z')
        || "+-*/^()=;,.".contains(c)
        || matches!(c, '√' | '|' | '²' | '³')
}

fn invalid(msg: impl Into<String>) -> EquationError {
    EquationError::Validation(msg.into())
}

/// checks `text` and returns its normalized form
pub fn validate(text: &str) -> Result<NormalizedText, EquationError> {
    if text.trim().is_empty() {
        return Err(invalid("the equation is empty"));
    }
    let length = text.chars().count();
    if length > MAX_INPUT_LENGTH {
        return Err(invalid(format!(
            "the equation has {} characters, at most {} are allowed",
            length, MAX_INPUT_LENGTH
        )));
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    for (i, part) in compact.split(';').enumerate() {
        let equal_signs = find_char_positions_outside_brackets(part, '=').len();
        match equal_signs {
            1 => {}
            0 if part.contains('=') => {
                check_brackets(part).map_err(invalid)?;
                return Err(invalid(format!(
                    "equation {} has its '=' inside parentheses",
                    i + 1
                )));
            }
            0 => {
                return Err(invalid(format!(
                    "equation {} must contain an equals sign (=)",
                    i + 1
                )));
            }
            n => {
                return Err(invalid(format!(
                    "equation {} contains {} equals signs, exactly one is allowed",
                    i + 1,
                    n
                )));
            }
        }
    }

    check_brackets(&compact).map_err(invalid)?;
    check_nesting(&compact).map_err(invalid)?;

    let mut letters_checked = compact.to_lowercase();
    for word in FUNCTION_WORDS {
        letters_checked = letters_checked.replace(word, "");
    }
    if let Some(bad) = letters_checked.chars().find(|c| !is_allowed_char(*c)) {
        return Err(invalid(format!("character '{}' is not allowed", bad)));
    }

    let consecutive = Regex::new(r"[+\-*/^]{2,}")
        .map_err(|e| invalid(format!("operator scan failed: {}", e)))?;
    if let Some(m) = consecutive.find(&compact) {
        return Err(invalid(format!(
            "consecutive operators '{}' are not valid",
            m.as_str()
        )));
    }

    let normalized = normalize(text);
    debug!("validated '{}' -> '{}'", text, normalized);
    Ok(NormalizedText(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> String {
        match validate(text) {
            Err(EquationError::Validation(msg)) => msg,
            other => panic!("expected a validation error for {}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_valid_inputs_are_normalized() {
        assert_eq!(validate("2x + 3 = 15").unwrap().as_str(), "2x+3=15");
        assert_eq!(validate("X^2 - 1 = 0").unwrap().as_str(), "x²-1=0");
        assert_eq!(validate("sqrt(x) = 3").unwrap().as_str(), "√(x)=3");
        assert_eq!(validate("abs(x)+2=5").unwrap().as_str(), "|x|+2=5");
        assert_eq!(validate("x+y=3; x-y=1").unwrap().as_str(), "x+y=3;x-y=1");
    }

    #[test]
    fn test_empty() {
        assert!(message("   ").contains("empty"));
    }

    #[test]
    fn test_missing_or_repeated_equals() {
        assert!(message("2x+3").contains("equals sign"));
        assert!(message("x=1=2").contains("2 equals signs"));
        assert!(message("x+y=3;x-y").contains("equation 2"));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(message("(x+1=2").contains("unbalanced"));
        assert!(message("x+1)=2").contains("unbalanced"));
    }

    #[test]
    fn test_nesting_and_length_limits() {
        let deep = format!("{}x{}=1", "(".repeat(20000), ")".repeat(20000));
        assert!(message(&deep).contains("characters"));
        let nested = format!("{}x{}=1", "(".repeat(200), ")".repeat(200));
        assert!(message(&nested).contains("nested 200 levels"));
        let roots = format!("{}x=1", "√".repeat(100));
        assert!(message(&roots).contains("nested"));
        assert!(validate(&format!("{}x{}=1", "(".repeat(30), ")".repeat(30))).is_ok());
    }

    #[test]
    fn test_disallowed_characters() {
        assert!(message("2a+1=3").contains("'a'"));
        assert!(message("x$=1").contains("'$'"));
    }

    #[test]
    fn test_consecutive_operators() {
        assert!(message("2x+-3=1").contains("+-"));
        assert!(message("x**2=4").contains("**"));
        assert!(message("x + - 1 = 0").contains("+-"));
    }
}
