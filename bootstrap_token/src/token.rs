//! The bootstrap token value type
//!
//! A [`BootstrapToken`] only exists in a state where both the id and the
//! secret satisfy the grammar. Downstream code can rely on that without
//! re-validating.

use std::fmt;
use std::str::FromStr;

use crate::config::compile_time::input::MAX_TOKEN_LENGTH;
use crate::error::TokenError;
use crate::grammar::{self, SECRET_SIZES, SEPARATOR};

/// Two-part bootstrap credential in the canonical form `<id>.<secret>`
///
/// `Debug` output never includes the secret. Use [`BootstrapToken::redacted`]
/// when a printable form is needed for logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BootstrapToken {
    id: String,
    secret: String,
}

impl BootstrapToken {
    /// Build a token from an id and secret that were already separated
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Result<Self, TokenError> {
        let id = id.into();
        let secret = secret.into();

        if !grammar::is_valid_id(&id) {
            return Err(TokenError::InvalidId {
                length: id.chars().count(),
            });
        }

        if !grammar::is_valid_secret(&secret) {
            return Err(TokenError::InvalidSecret {
                length: secret.chars().count(),
                accepted: &SECRET_SIZES,
            });
        }

        Ok(Self { id, secret })
    }

    /// Parse the combined `<id>.<secret>` form
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        if raw.is_empty() {
            return Err(TokenError::malformed("empty input"));
        }

        if raw.len() > MAX_TOKEN_LENGTH {
            return Err(TokenError::malformed(format!(
                "input is {} bytes, exceeding the {} byte limit",
                raw.len(),
                MAX_TOKEN_LENGTH
            )));
        }

        let separators = raw.matches(SEPARATOR).count();
        if separators != 1 {
            return Err(TokenError::malformed(format!(
                "expected exactly one '{}' separator, found {}",
                SEPARATOR, separators
            )));
        }

        match raw.split_once(SEPARATOR) {
            Some((id, secret)) => Self::new(id, secret),
            None => Err(TokenError::malformed(format!(
                "missing '{}' separator",
                SEPARATOR
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn into_parts(self) -> (String, String) {
        (self.id, self.secret)
    }

    /// Combined form with every secret character masked
    pub fn redacted(&self) -> String {
        format!("{}{}{}", self.id, SEPARATOR, "*".repeat(self.secret.len()))
    }
}

impl fmt::Display for BootstrapToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, SEPARATOR, self.secret)
    }
}

impl fmt::Debug for BootstrapToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapToken")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl FromStr for BootstrapToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for BootstrapToken {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for BootstrapToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BootstrapToken> for String {
    fn from(token: BootstrapToken) -> Self {
        token.to_string()
    }
}
