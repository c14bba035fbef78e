//! Currency code type and rate-pair cache key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CurrencyCodeError {
    /// The input string is empty.
    #[error("currency code cannot be empty")]
    Empty,
    /// The input is not exactly three characters long.
    #[error("currency code must be exactly 3 characters (got {got})")]
    WrongLength {
        /// Number of characters in the input.
        got: usize,
    },
    /// The input contains a non-alphabetic character.
    #[error("currency code must be alphabetic: {0:?}")]
    NonAlphabetic(String),
}

/// An ISO 4217 style currency code such as `USD`, `EUR`, or `MAD`.
///
/// Parsing trims surrounding whitespace and normalizes to uppercase, so
/// `" eur "` and `"EUR"` produce the same code. The gateway and the curated
/// selection list both traffic in these codes.
///
/// ## Examples
///
/// ```
/// use localprice_core::CurrencyCode;
///
/// let eur = CurrencyCode::parse("eur").unwrap();
/// assert_eq!(eur.as_str(), "EUR");
///
/// assert!(CurrencyCode::parse("").is_err());
/// assert!(CurrencyCode::parse("EURO").is_err());
/// assert!(CurrencyCode::parse("E1R").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a `CurrencyCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, not exactly three
    /// characters, or contains non-alphabetic characters.
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }

        let len = trimmed.chars().count();
        if len != 3 {
            return Err(CurrencyCodeError::WrongLength { got: len });
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError::NonAlphabetic(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CurrencyCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A (from, to) currency pair identifying one exchange rate.
///
/// Used as the rate-cache key so rates for different pairs never shadow each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatePair {
    /// Currency the page's original prices are denominated in.
    pub from: CurrencyCode,
    /// Currency the prices should be displayed in.
    pub to: CurrencyCode,
}

impl RatePair {
    /// Create a new rate pair.
    #[must_use]
    pub const fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    /// Whether the pair converts a currency into itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for RatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
