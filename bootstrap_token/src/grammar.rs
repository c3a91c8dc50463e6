//! Lexical grammar for bootstrap tokens
//!
//! A token is `<id>.<secret>`: a 6 character id and a 16 or 24 character
//! secret, both drawn from `[a-z0-9]`. The patterns are compiled once and
//! shared read-only across threads.

use regex::Regex;
use std::sync::OnceLock;

/// Exact length of the token id
pub const ID_LENGTH: usize = 6;

/// Accepted secret lengths
pub const SECRET_SIZES: [usize; 2] = [16, 24];

/// Separator between id and secret in the combined form
pub const SEPARATOR: char = '.';

/// Longest valid combined form
pub const LONGEST_TOKEN_LENGTH: usize = ID_LENGTH + 1 + SECRET_SIZES[1];

pub const ID_PATTERN: &str = r"^[a-z0-9]{6}$";

pub const SECRET_PATTERN: &str = r"^(?:[a-z0-9]{16}|[a-z0-9]{24})$";

pub const TOKEN_PATTERN: &str = r"^([a-z0-9]{6})\.([a-z0-9]{16}|[a-z0-9]{24})$";

static ID_REGEX: OnceLock<Regex> = OnceLock::new();
static SECRET_REGEX: OnceLock<Regex> = OnceLock::new();
static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn id_regex() -> &'static Regex {
    ID_REGEX.get_or_init(|| Regex::new(ID_PATTERN).expect("ID_PATTERN is a valid regex"))
}

fn secret_regex() -> &'static Regex {
    SECRET_REGEX
        .get_or_init(|| Regex::new(SECRET_PATTERN).expect("SECRET_PATTERN is a valid regex"))
}

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN is a valid regex"))
}

pub fn is_valid_id(id: &str) -> bool {
    id_regex().is_match(id)
}

pub fn is_valid_secret(secret: &str) -> bool {
    secret_regex().is_match(secret)
}

/// Check a combined `<id>.<secret>` string in a single pass
pub fn is_valid_token(token: &str) -> bool {
    token_regex().is_match(token)
}

/// Split a combined token into `(id, secret)` if it matches the full grammar
pub fn split_token(token: &str) -> Option<(&str, &str)> {
    let captures = token_regex().captures(token)?;
    let id = captures.get(1)?.as_str();
    let secret = captures.get(2)?.as_str();
    Some((id, secret))
}
