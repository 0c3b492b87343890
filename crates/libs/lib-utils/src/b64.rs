//! # Base64url Encoding
//!
//! URL-safe, unpadded base64 as used by the segments of compact signed tokens.

use base64::{Engine as _, engine::general_purpose};

/// Encode bytes to base64 URL-safe string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_header_segment() {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;

        assert_eq!(b64u_encode(header), "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
    }

    #[test]
    fn test_no_padding_and_url_alphabet() {
        assert_eq!(b64u_encode("a"), "YQ");
        assert_eq!(b64u_encode([0xfb, 0xff]), "-_8");
    }
}
