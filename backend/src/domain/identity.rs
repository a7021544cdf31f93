//! Opaque caller identity.
//!
//! The execution environment authenticates callers and hands the registry an
//! identity token per call. The registry only compares identities for
//! equality and uses them as map keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width of an identity token in bytes.
pub const IDENTITY_LEN: usize = 20;

const PREFIX: &str = "0x";

/// Errors returned when parsing an [`Identity`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityParseError {
    MissingPrefix,
    InvalidLength { expected: usize, actual: usize },
    InvalidHex,
}

impl fmt::Display for IdentityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "identity must start with {PREFIX}"),
            Self::InvalidLength { expected, actual } => write!(
                f,
                "identity must have {expected} hex digits after {PREFIX} (got {actual})"
            ),
            Self::InvalidHex => write!(f, "identity must contain only hex digits"),
        }
    }
}

impl std::error::Error for IdentityParseError {}

/// Opaque caller identity, rendered as `0x` followed by 40 lowercase hex digits.
///
/// ## Invariants
/// - [`Identity::ZERO`] is never a valid registrant or follow target; the
///   registry enforces this, the type itself can represent it.
///
/// # Examples
/// ```
/// use social_music::domain::Identity;
///
/// let id: Identity = "0x00000000000000000000000000000000000000aa"
///     .parse()
///     .expect("valid identity");
/// assert!(!id.is_zero());
/// assert_eq!(id.to_string(), "0x00000000000000000000000000000000000000aa");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// The all-zero identity.
    pub const ZERO: Self = Self([0; IDENTITY_LEN]);

    /// Build an identity from raw token bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Whether this is the all-zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw token bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }
}

impl From<[u8; IDENTITY_LEN]> for Identity {
    fn from(value: [u8; IDENTITY_LEN]) -> Self {
        Self(value)
    }
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw
            .strip_prefix(PREFIX)
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or(IdentityParseError::MissingPrefix)?;
        if digits.len() != IDENTITY_LEN * 2 {
            return Err(IdentityParseError::InvalidLength {
                expected: IDENTITY_LEN * 2,
                actual: digits.len(),
            });
        }

        let mut bytes = [0_u8; IDENTITY_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| IdentityParseError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", hex::encode(self.0))
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
