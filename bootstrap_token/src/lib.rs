//! # Bootstrap Token
//!
//! Validated two-part credential (`<id>.<secret>`) presented by a new member
//! joining a cluster. The crate enforces the token grammar, splits and joins
//! the two parts, and (de)serializes the value as a single string field.

// Internal modules
pub mod codec;
pub mod config;
pub mod error;
pub mod grammar;
pub mod token;

// Re-export key types for library consumers
pub use codec::{decode_json, encode_json};
pub use error::{TokenError, TokenErrorKind};
pub use token::BootstrapToken;
