//! JSON and serde support for [`BootstrapToken`]
//!
//! On the wire a token is always a single string `"<id>.<secret>"`, never an
//! object with separate fields. The serde hooks here let the token sit in any
//! serde document (JSON, TOML, ...) as a plain string field.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::compile_time::input::MAX_DOCUMENT_SIZE;
use crate::error::TokenError;
use crate::token::BootstrapToken;

/// Encode a token as a JSON string literal
///
/// This is a pure string operation and does not re-validate the token.
pub fn encode_json(token: &BootstrapToken) -> Result<Vec<u8>, TokenError> {
    Ok(serde_json::to_vec(&token.to_string())?)
}

/// Decode a JSON string literal into a token
///
/// Bytes that are not a JSON string fail with a decode error. A well-formed
/// string is then held to the token grammar, and grammar errors are returned
/// as-is.
pub fn decode_json(bytes: &[u8]) -> Result<BootstrapToken, TokenError> {
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(TokenError::DocumentTooLarge {
            size: bytes.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }

    let raw: String = serde_json::from_slice(bytes)?;
    BootstrapToken::parse(&raw)
}

impl Serialize for BootstrapToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct BootstrapTokenVisitor;

impl<'de> Visitor<'de> for BootstrapTokenVisitor {
    type Value = BootstrapToken;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a bootstrap token string of the form \"<id>.<secret>\"")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        BootstrapToken::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BootstrapToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(BootstrapTokenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenErrorKind;
    use assert_matches::assert_matches;
    use serde::{Deserialize, Serialize};

    fn token(id: &str, secret: &str) -> BootstrapToken {
        BootstrapToken::new(id, secret).unwrap()
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct JoinConfiguration {
        api_server: String,
        token: BootstrapToken,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discovery_token: Option<BootstrapToken>,
    }

    #[test]
    fn test_encode_json() {
        let encoded = encode_json(&token("abcdef", "abcdef0123456789")).unwrap();
        assert_eq!(encoded, br#""abcdef.abcdef0123456789""#.to_vec());

        let encoded = encode_json(&token("123456", "abcdef0123456789abcdef01")).unwrap();
        assert_eq!(
            String::from_utf8(encoded).unwrap(),
            r#""123456.abcdef0123456789abcdef01""#
        );
    }

    #[test]
    fn test_decode_json() {
        let cases: [(&str, Option<TokenErrorKind>); 10] = [
            (r#""f.s""#, Some(TokenErrorKind::InvalidId)),
            (r#""abcdef.""#, Some(TokenErrorKind::InvalidSecret)),
            (
                r#""abcdef:abcdef0123456789""#,
                Some(TokenErrorKind::MalformedInput),
            ),
            ("abcdef.abcdef0123456789", Some(TokenErrorKind::Decode)),
            (r#""abcdef.abcdef0123456789"#, Some(TokenErrorKind::Decode)),
            (
                r#""abcdef.ABCDEF0123456789""#,
                Some(TokenErrorKind::InvalidSecret),
            ),
            (r#"{"id":"abcdef","secret":"abcdef0123456789"}"#, Some(TokenErrorKind::Decode)),
            ("42", Some(TokenErrorKind::Decode)),
            (r#""abcdef.abcdef0123456789""#, None),
            (r#""123456.aabbccddeeffgghh""#, None),
        ];

        for (input, expected) in cases {
            let result = decode_json(input.as_bytes());
            match expected {
                Some(kind) => {
                    let err = result.expect_err(&format!("expected {} to fail", input));
                    assert_eq!(err.kind(), kind, "input {}: {}", input, err);
                }
                None => {
                    let decoded = result
                        .unwrap_or_else(|e| panic!("expected {} to decode, got {}", input, e));
                    assert_eq!(format!("\"{}\"", decoded), input);
                }
            }
        }
    }

    #[test]
    fn test_decode_grammar_errors_are_not_wrapped() {
        assert_matches!(
            decode_json(br#""abcdef.AABBCCD-EEFFGGHH""#),
            Err(TokenError::InvalidSecret { length: 16, .. })
        );
        assert_matches!(decode_json(b"null"), Err(TokenError::Decode(_)));
        assert_matches!(decode_json(b""), Err(TokenError::Decode(_)));
    }

    #[test]
    fn test_decode_allows_surrounding_whitespace() {
        let decoded = decode_json(b" \"abcdef.abcdef0123456789\"\n").unwrap();
        assert_eq!(decoded, token("abcdef", "abcdef0123456789"));
        assert!(decode_json(br#""abcdef.abcdef0123456789" x"#).is_err());
    }

    #[test]
    fn test_decode_unescapes_before_grammar() {
        let decoded = decode_json(br#""abcdef\u002eabcdef0123456789""#).unwrap();
        assert_eq!(decoded, token("abcdef", "abcdef0123456789"));
        assert_eq!(
            encode_json(&decoded).unwrap(),
            br#""abcdef.abcdef0123456789""#.to_vec()
        );

        assert_matches!(
            decode_json(br#""abcdef.abcdef012345678\u0041""#),
            Err(TokenError::InvalidSecret { .. })
        );
    }

    #[test]
    fn test_decode_rejects_oversized_document() {
        let mut doc = vec![b' '; MAX_DOCUMENT_SIZE];
        doc.extend_from_slice(br#""abcdef.abcdef0123456789""#);
        assert_matches!(
            decode_json(&doc),
            Err(TokenError::DocumentTooLarge { max, .. }) if max == MAX_DOCUMENT_SIZE
        );
    }

    #[test]
    fn test_roundtrip_from_string() {
        for input in [
            r#""abcdef.abcdef0123456789""#,
            r#""123456.aabbccddeeffgghh""#,
            r#""0a1b2c.abcdef0123456789abcdef01""#,
        ] {
            let decoded = decode_json(input.as_bytes()).unwrap();
            let encoded = encode_json(&decoded).unwrap();
            assert_eq!(encoded, input.as_bytes(), "roundtrip of {}", input);
        }
    }

    #[test]
    fn test_roundtrip_from_token() {
        for original in [
            token("abcdef", "abcdef0123456789"),
            token("zz9999", "abcdef0123456789abcdef01"),
        ] {
            let encoded = encode_json(&original).unwrap();
            let decoded = decode_json(&encoded).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let value = serde_json::to_value(token("abcdef", "abcdef0123456789")).unwrap();
        assert_eq!(
            value,
            serde_json::Value::String("abcdef.abcdef0123456789".to_string())
        );
    }

    #[test]
    fn test_embedded_in_json_document() {
        let doc = r#"{"api_server":"10.0.0.1:6443","token":"abcdef.abcdef0123456789"}"#;
        let config: JoinConfiguration = serde_json::from_str(doc).unwrap();
        assert_eq!(config.token, token("abcdef", "abcdef0123456789"));
        assert_eq!(config.discovery_token, None);
        assert_eq!(serde_json::to_string(&config).unwrap(), doc);
    }

    #[test]
    fn test_embedded_invalid_token_reports_grammar() {
        let doc = r#"{"api_server":"10.0.0.1:6443","token":"abcdef.ABCDEF0123456789"}"#;
        let err = serde_json::from_str::<JoinConfiguration>(doc).unwrap_err();
        assert!(err.to_string().contains("invalid bootstrap token secret"));

        let doc = r#"{"api_server":"10.0.0.1:6443","token":{"id":"abcdef","secret":"abcdef0123456789"}}"#;
        let err = serde_json::from_str::<JoinConfiguration>(doc).unwrap_err();
        assert!(err.to_string().contains("a bootstrap token string"));
    }

    #[test]
    fn test_embedded_in_toml_document() {
        let doc = r#"
api_server = "10.0.0.1:6443"
token = "abcdef.abcdef0123456789"
discovery_token = "123456.aabbccddeeffgghh"
"#;
        let config: JoinConfiguration = toml::from_str(doc).unwrap();
        assert_eq!(config.token.id(), "abcdef");
        assert_eq!(
            config.discovery_token,
            Some(token("123456", "aabbccddeeffgghh"))
        );

        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains(r#"token = "abcdef.abcdef0123456789""#));

        let reparsed: JoinConfiguration = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_toml_rejects_invalid_token() {
        let doc = r#"
api_server = "10.0.0.1:6443"
token = "abcde.abcdef0123456789"
"#;
        let err = toml::from_str::<JoinConfiguration>(doc).unwrap_err();
        assert!(err.to_string().contains("invalid bootstrap token id"));
    }
}
