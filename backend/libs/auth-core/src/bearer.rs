use crate::{AuthError, Identity, TokenCodec};

/// Pull the token out of a raw `Bearer <token>` credential value.
///
/// Parsing is strict: exactly two whitespace-separated tokens, the first
/// equal to the literal `Bearer` (case-sensitive). A carrier that is present
/// but empty counts as missing, not malformed.
pub fn extract_bearer(raw: Option<&str>) -> Result<&str, AuthError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingCredential),
    };

    let parts: Vec<&str> = raw.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// The one extraction-and-verification path shared by both transports.
///
/// The HTTP middleware hands in the `Authorization` header value, the gRPC
/// interceptor the first `authorization` metadata entry; everything from
/// there on is identical.
pub fn authenticate(codec: &TokenCodec, raw: Option<&str>) -> Result<Identity, AuthError> {
    let token = extract_bearer(raw)?;
    codec.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_bearer_value_yields_token() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_carrier_is_missing_credential() {
        assert_eq!(extract_bearer(None), Err(AuthError::MissingCredential));
    }

    #[test]
    fn empty_carrier_is_missing_not_malformed() {
        assert_eq!(extract_bearer(Some("")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn bearer_with_empty_token_is_malformed() {
        assert_eq!(
            extract_bearer(Some("Bearer ")),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn three_parts_are_malformed_not_partially_parsed() {
        assert_eq!(
            extract_bearer(Some("Bearer abc def")),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            extract_bearer(Some("bearer abc")),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn token_alone_is_malformed() {
        assert_eq!(
            extract_bearer(Some("abc.def.ghi")),
            Err(AuthError::MalformedCredential)
        );
    }

    #[test]
    fn authenticate_verifies_the_extracted_token() {
        let codec = TokenCodec::new("secret").unwrap();
        let token = codec.issue("user-1").unwrap();
        let header = format!("Bearer {token}");

        let identity = authenticate(&codec, Some(&header)).unwrap();
        assert_eq!(identity.subject, "user-1");
    }

    #[test]
    fn authenticate_rejects_tampered_token() {
        let codec = TokenCodec::new("secret").unwrap();
        let token = codec.issue("user-1").unwrap();
        let header = format!("Bearer {}x", token);

        assert!(authenticate(&codec, Some(&header)).is_err());
    }
}
