//! Secondary tokens
//!
//! A validated guest receives a secondary token that door staff use to confirm
//! physical entry. Tokens must be unique across the ledger at the moment they
//! are issued.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

/// Default number of random draws before falling back to a time-derived token.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1_000;

const ALNUM_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";
const BASE36_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const PIN_MIN: u16 = 1_000;
const PIN_MAX: u16 = 9_999;
const ALNUM_LENGTH: usize = 6;
const HEX_BYTES: usize = 16;

// PIN_MIN..=PIN_MAX and 36^ALNUM_LENGTH
const PIN_SPACE: u64 = 9_000;
const ALNUM_SPACE: u64 = 2_176_782_336;

/// Unknown token format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token format {0:?}, expected one of: pin4, alnum6, hex32")]
pub struct UnknownTokenFormat(pub String);

/// Shape of issued tokens. Short formats suit small rosters only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenFormat {
    /// Four decimal digits, `1000`–`9999`.
    Pin4,

    /// Six upper-case letters and digits.
    #[default]
    Alnum6,

    /// Thirty-two lower-case hex characters.
    Hex32,
}

impl TokenFormat {
    /// Format name as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pin4 => "pin4",
            Self::Alnum6 => "alnum6",
            Self::Hex32 => "hex32",
        }
    }

    /// Number of characters in a randomly drawn token.
    pub const fn token_len(self) -> usize {
        match self {
            Self::Pin4 => 4,
            Self::Alnum6 => ALNUM_LENGTH,
            Self::Hex32 => HEX_BYTES * 2,
        }
    }

    fn random<R: Rng>(self, rng: &mut R) -> String {
        match self {
            Self::Pin4 => rng.gen_range(PIN_MIN..=PIN_MAX).to_string(),
            Self::Alnum6 => (0..ALNUM_LENGTH)
                .map(|_| pick(ALNUM_ALPHABET, rng.gen_range(0..ALNUM_ALPHABET.len())))
                .collect(),
            Self::Hex32 => encode_hex(&rng.r#gen::<[u8; HEX_BYTES]>()),
        }
    }

    /// Number of distinct fallback candidates that keep the format length.
    const fn fallback_space(self) -> u64 {
        match self {
            Self::Pin4 => PIN_SPACE,
            Self::Alnum6 => ALNUM_SPACE,
            Self::Hex32 => u64::MAX,
        }
    }

    /// The `step`th clock-derived candidate. Consecutive steps give distinct
    /// values across [`Self::fallback_space`].
    fn fallback(self, now: Timestamp, step: u64) -> String {
        match self {
            Self::Pin4 => {
                let offset = (i128::from(now.as_millisecond()) + i128::from(step))
                    .rem_euclid(i128::from(PIN_SPACE));

                (u16::try_from(offset).unwrap_or_default() + PIN_MIN).to_string()
            }
            Self::Alnum6 => {
                let encoded = encode_base36(
                    now.as_nanosecond()
                        .unsigned_abs()
                        .wrapping_add(u128::from(step)),
                );
                let skip = encoded.len().saturating_sub(ALNUM_LENGTH);

                format!("{:0>ALNUM_LENGTH$}", encoded.chars().skip(skip).collect::<String>())
            }
            Self::Hex32 => {
                let digest = Sha256::digest(format!("{}:{step}", now.as_nanosecond()));
                let mut bytes = [0_u8; HEX_BYTES];

                bytes.copy_from_slice(digest.get(..HEX_BYTES).unwrap_or(&[0_u8; HEX_BYTES]));

                encode_hex(&bytes)
            }
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenFormat {
    type Err = UnknownTokenFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pin4" | "pin" => Ok(Self::Pin4),
            "alnum6" | "alnum" => Ok(Self::Alnum6),
            "hex32" | "hex" => Ok(Self::Hex32),
            _ => Err(UnknownTokenFormat(value.to_string())),
        }
    }
}

/// A guest's proof of admission for door staff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecondaryToken(String);

impl SecondaryToken {
    /// Wrap an existing token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecondaryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecondaryToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SecondaryToken> for String {
    fn from(token: SecondaryToken) -> Self {
        token.0
    }
}

/// Anything that can answer "is this token already issued?".
pub trait TokenSet {
    /// Whether `token` is currently issued.
    fn contains_token(&self, token: &str) -> bool;
}

impl TokenSet for FxHashSet<String> {
    fn contains_token(&self, token: &str) -> bool {
        self.contains(token)
    }
}

impl TokenSet for [&str] {
    fn contains_token(&self, token: &str) -> bool {
        self.contains(&token)
    }
}

/// Collision-checked token generator.
#[derive(Debug, Clone, Copy)]
pub struct TokenGenerator {
    format: TokenFormat,
    max_attempts: u32,
}

impl TokenGenerator {
    /// Create a generator for the given format.
    pub const fn new(format: TokenFormat) -> Self {
        Self {
            format,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the number of random draws tried before falling back.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Configured format.
    pub const fn format(&self) -> TokenFormat {
        self.format
    }

    /// Draw a token that `existing` does not contain.
    ///
    /// After `max_attempts` collisions the token is derived from `now`
    /// instead, stepping past issued values, so this always terminates with
    /// an unused token. Only when every value of the format is issued does
    /// the fallback grow past the format length.
    pub fn generate<S: TokenSet + ?Sized>(&self, existing: &S, now: Timestamp) -> SecondaryToken {
        self.generate_with(&mut rand::thread_rng(), existing, now)
    }

    /// [`Self::generate`] with a caller-supplied random source.
    pub fn generate_with<R, S>(&self, rng: &mut R, existing: &S, now: Timestamp) -> SecondaryToken
    where
        R: Rng,
        S: TokenSet + ?Sized,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.format.random(rng);

            if !existing.contains_token(&candidate) {
                return SecondaryToken(candidate);
            }
        }

        warn!(
            format = %self.format,
            attempts = self.max_attempts,
            "random draws exhausted, issuing time-derived token"
        );

        SecondaryToken(self.fallback(existing, now))
    }

    fn fallback<S: TokenSet + ?Sized>(&self, existing: &S, now: Timestamp) -> String {
        let format = self.format;

        let within_format = (0..format.fallback_space())
            .map(|step| format.fallback(now, step))
            .find(|candidate| !existing.contains_token(candidate));

        within_format.unwrap_or_else(|| {
            let base = format.fallback(now, 0);

            warn!(format = %format, "every token of this format is issued, extending");

            (0_u64..=u64::MAX)
                .map(|suffix| format!("{base}{suffix}"))
                .find(|candidate| !existing.contains_token(candidate))
                .unwrap_or(base)
        })
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new(TokenFormat::default())
    }
}

fn pick(alphabet: &[u8], index: usize) -> char {
    alphabet.get(index).copied().map_or('0', char::from)
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(pick(HEX_ALPHABET, usize::from(byte >> 4)));
        encoded.push(pick(HEX_ALPHABET, usize::from(byte & 0x0f)));
    }

    encoded
}

fn encode_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();

    while value > 0 {
        let index = usize::try_from(value % 36).unwrap_or_default();

        digits.push(pick(BASE36_ALPHABET, index));
        value /= 36;
    }

    digits.iter().rev().collect()
}
