//! Error types for bootstrap token handling
//!
//! Messages identify the failing segment and rule but never echo secret material.

use crate::grammar::ID_LENGTH;

/// Bootstrap token validation and decoding errors
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed bootstrap token: {reason}")]
    MalformedInput { reason: String },

    #[error(
        "invalid bootstrap token id ({length} characters): must be exactly {} characters of [a-z0-9]",
        ID_LENGTH
    )]
    InvalidId { length: usize },

    #[error("invalid bootstrap token secret ({length} characters): must be {accepted:?} characters of [a-z0-9]")]
    InvalidSecret {
        length: usize,
        accepted: &'static [usize],
    },

    #[error("bootstrap token document is {size} bytes, exceeding the {max} byte limit")]
    DocumentTooLarge { size: usize, max: usize },

    #[error("bootstrap token is not a valid JSON string: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Broad classification of a [`TokenError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    MalformedInput,
    InvalidId,
    InvalidSecret,
    Decode,
}

impl TokenError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> TokenErrorKind {
        match self {
            TokenError::MalformedInput { .. } => TokenErrorKind::MalformedInput,
            TokenError::InvalidId { .. } => TokenErrorKind::InvalidId,
            TokenError::InvalidSecret { .. } => TokenErrorKind::InvalidSecret,
            TokenError::DocumentTooLarge { .. } | TokenError::Decode(_) => TokenErrorKind::Decode,
        }
    }

    /// Stable error code (for CLI and API diagnostics)
    pub fn code(&self) -> &'static str {
        match self.kind() {
            TokenErrorKind::MalformedInput => "MALFORMED_INPUT",
            TokenErrorKind::InvalidId => "INVALID_ID",
            TokenErrorKind::InvalidSecret => "INVALID_SECRET",
            TokenErrorKind::Decode => "DECODE_ERROR",
        }
    }

    /// Whether the input was well-formed transport but broke the token grammar
    pub fn is_grammar_violation(&self) -> bool {
        !matches!(self.kind(), TokenErrorKind::Decode)
    }
}
