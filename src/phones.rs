//! Phones
//!
//! Guests are keyed by their mobile number. Raw input is normalized by
//! stripping every non-digit; what remains must be a ten digit number with
//! the mobile prefix.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required length of a normalized phone number.
pub const PHONE_LENGTH: usize = 10;

/// Prefix every accepted mobile number starts with.
pub const PHONE_PREFIX: &str = "05";

const MASK: &str = "****";
const MASK_VISIBLE_HEAD: usize = 3;
const MASK_VISIBLE_TAIL: usize = 3;

/// Phone number rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneError {
    /// The input contained no digits at all.
    #[error("phone number is missing")]
    Empty,

    /// The normalized number does not have exactly ten digits.
    #[error("phone number must have 10 digits, found {0}")]
    InvalidLength(usize),

    /// The normalized number does not start with the mobile prefix.
    #[error("phone number must start with 05")]
    InvalidPrefix,
}

/// A normalized, validated phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Normalize and validate a raw phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] when the digits left after normalization are
    /// missing, of the wrong length, or lack the mobile prefix.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let digits = normalize(raw);

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if digits.len() != PHONE_LENGTH {
            return Err(PhoneError::InvalidLength(digits.len()));
        }

        if !digits.starts_with(PHONE_PREFIX) {
            return Err(PhoneError::InvalidPrefix);
        }

        Ok(Self(digits))
    }

    /// The normalized digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form that hides the middle of the number, e.g. `050****567`.
    pub fn masked(&self) -> String {
        let head = self.0.get(..MASK_VISIBLE_HEAD).unwrap_or_default();
        let tail = self
            .0
            .get(PHONE_LENGTH - MASK_VISIBLE_TAIL..)
            .unwrap_or_default();

        format!("{head}{MASK}{tail}")
    }
}

/// Strip every character that is not an ASCII digit.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = PhoneError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_strips_separators() -> TestResult {
        let phone = Phone::parse("050-123 4567")?;

        assert_eq!(phone.as_str(), "0501234567");

        Ok(())
    }

    #[test]
    fn parse_strips_international_formatting() {
        // "+972" leaves twelve digits behind, which is not a local number
        assert_eq!(
            Phone::parse("+972 50-123-4567"),
            Err(PhoneError::InvalidLength(12))
        );
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        assert_eq!(Phone::parse("0000000000"), Err(PhoneError::InvalidPrefix));
        assert_eq!(Phone::parse("0612345678"), Err(PhoneError::InvalidPrefix));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(Phone::parse("050123456"), Err(PhoneError::InvalidLength(9)));
        assert_eq!(
            Phone::parse("05012345678"),
            Err(PhoneError::InvalidLength(11))
        );
    }

    #[test]
    fn parse_rejects_input_without_digits() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("phone"), Err(PhoneError::Empty));
    }

    #[test]
    fn parse_outcome_depends_only_on_digits() {
        let inputs = ["0501234567", "(050) 123-4567", "050.123.4567", "a0b5c01234567"];

        for input in inputs {
            assert_eq!(
                Phone::parse(input).map(String::from),
                Ok("0501234567".to_string()),
                "{input} should normalize to the same number"
            );
        }
    }

    #[test]
    fn masked_keeps_head_and_tail() -> TestResult {
        let phone = Phone::parse("0501234567")?;

        assert_eq!(phone.masked(), "050****567");

        Ok(())
    }

    #[test]
    fn deserialize_normalizes() -> TestResult {
        let phone: Phone = serde_norway::from_str("\"050-999-0000\"")?;

        assert_eq!(phone.as_str(), "0509990000");

        Ok(())
    }
}
