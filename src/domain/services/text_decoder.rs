//! Binary to text decoding for text-bearing content.

use encoding_rs::{Encoding, UTF_8};

use super::mime_classifier::mime_parameter;
use crate::domain::errors::ContentError;

/// Decodes payload bytes to a `String`.
pub struct TextDecoder;

impl TextDecoder {
    /// Decodes `bytes` using, in order: a byte order mark, the `charset`
    /// parameter of `content_type`, then UTF-8.
    ///
    /// # Errors
    /// Returns `ContentError::Decode` if the charset label is unknown or the
    /// bytes are malformed for the chosen encoding.
    pub fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<String, ContentError> {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            return decode_with(&bytes[bom_len..], encoding);
        }

        let encoding = match content_type.and_then(|ct| mime_parameter(ct, "charset")) {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| ContentError::decode(label, "unknown charset label"))?,
            None => UTF_8,
        };

        decode_with(bytes, encoding)
    }
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ContentError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ContentError::decode(
            encoding.name(),
            "malformed byte sequence",
        ));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_utf8_by_default() {
        let text = TextDecoder::decode("héllo".as_bytes(), Some("text/plain")).unwrap();
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_honours_charset_parameter() {
        let latin1 = [0x63, 0x61, 0x66, 0xE9];
        let text = TextDecoder::decode(&latin1, Some("text/plain; charset=ISO-8859-1")).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_bom_wins_over_charset() {
        let bytes = [0xEF, 0xBB, 0xBF, b'o', b'k'];
        let text = TextDecoder::decode(&bytes, Some("text/plain; charset=windows-1252")).unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_invalid_utf8_is_decode_failure() {
        let err = TextDecoder::decode(&[b'a', 0xC3, 0x28, 0x80], Some("text/html")).unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_unknown_charset_is_decode_failure() {
        let err = TextDecoder::decode(b"abc", Some("text/plain; charset=klingon")).unwrap_err();
        assert!(matches!(err, ContentError::Decode { ref encoding, .. } if encoding == "klingon"));
    }
}
