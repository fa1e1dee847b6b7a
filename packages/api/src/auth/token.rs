//! Client-side look at a JWT's `exp` claim. The signature is not checked; the
//! backend stays the authority.

use base64::Engine;
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<f64>,
}

/// Whether `token` is a JWT whose `exp` (seconds) lies before `now_ms`.
///
/// Opaque tokens, undecodable payloads and payloads without `exp` count as
/// not expired.
pub fn is_token_expired(token: &str, now_ms: u64) -> bool {
    let Some(payload) = token.split('.').nth(1) else {
        return false;
    };
    let Ok(bytes) = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
    else {
        return false;
    };
    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(Claims { exp: Some(exp) }) => exp * 1000.0 < now_ms as f64,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: &str) -> String {
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(claims);
        format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
    }

    #[test]
    fn test_expired_and_live_tokens() {
        let now_ms = 1_700_000_000_000;
        assert!(is_token_expired(&jwt(r#"{"sub":"7","exp":1600000000}"#), now_ms));
        assert!(!is_token_expired(&jwt(r#"{"sub":"7","exp":1800000000}"#), now_ms));
        assert!(!is_token_expired(&jwt(r#"{"sub":"7"}"#), now_ms));
    }

    #[test]
    fn test_undecodable_tokens_count_as_valid() {
        let now_ms = 1_700_000_000_000;
        assert!(!is_token_expired("t1", now_ms));
        assert!(!is_token_expired("a.%%%.c", now_ms));
        assert!(!is_token_expired(&jwt("not json"), now_ms));
    }
}
