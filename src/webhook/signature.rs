use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature header missing")]
    MissingHeader,
    #[error("malformed signature header")]
    Malformed,
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("signature digest is not valid hex")]
    BadDigest,
    #[error("signature mismatch")]
    Mismatch,
}

/// Checks an `<algorithm>=<hexdigest>` header against the keyed hash of the
/// raw request body. The digest comparison goes through `Mac::verify_slice`,
/// which is constant-time; plain `==` on digests would leak the position of
/// the first mismatched byte.
pub fn verify(secret: &[u8], header: Option<&str>, body: &[u8]) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::MissingHeader)?;
    let (algorithm, hex_digest) = header.split_once('=').ok_or(SignatureError::Malformed)?;
    if hex_digest.is_empty() {
        return Err(SignatureError::Malformed);
    }

    let digest = hex::decode(hex_digest).map_err(|_| SignatureError::BadDigest)?;

    match algorithm {
        "sha1" => {
            if digest.len() != 20 {
                return Err(SignatureError::BadDigest);
            }
            let mut mac = HmacSha1::new_from_slice(secret).map_err(|_| SignatureError::Mismatch)?;
            mac.update(body);
            mac.verify_slice(&digest).map_err(|_| SignatureError::Mismatch)
        }
        "sha256" => {
            if digest.len() != 32 {
                return Err(SignatureError::BadDigest);
            }
            let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::Mismatch)?;
            mac.update(body);
            mac.verify_slice(&digest).map_err(|_| SignatureError::Mismatch)
        }
        other => Err(SignatureError::UnsupportedAlgorithm(other.into())),
    }
}

#[cfg(test)]
pub(crate) fn sign_sha1(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).unwrap();
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
pub(crate) fn sign_sha256(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"super-secret";
    const BODY: &[u8] = b"{\"ref\":\"refs/heads/main\"}";

    fn flip_last_hex_char(signature: &str) -> String {
        let mut flipped = signature.to_string();
        let last = flipped.pop().unwrap();
        flipped.push(if last == '0' { '1' } else { '0' });
        flipped
    }

    #[test]
    fn valid_sha1_signature_verifies() {
        let header = sign_sha1(SECRET, BODY);
        assert_eq!(verify(SECRET, Some(&header), BODY), Ok(()));
    }

    #[test]
    fn valid_sha256_signature_verifies() {
        let header = sign_sha256(SECRET, BODY);
        assert_eq!(verify(SECRET, Some(&header), BODY), Ok(()));
    }

    #[test]
    fn flipped_bit_is_rejected() {
        let header = flip_last_hex_char(&sign_sha1(SECRET, BODY));
        assert_eq!(verify(SECRET, Some(&header), BODY), Err(SignatureError::Mismatch));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let header = sign_sha1(b"other-secret", BODY);
        assert_eq!(verify(SECRET, Some(&header), BODY), Err(SignatureError::Mismatch));
    }

    #[test]
    fn wrong_body_is_rejected() {
        // same digest length as the real one, differs only in content
        let header = sign_sha1(SECRET, b"something else entirely");
        assert_eq!(verify(SECRET, Some(&header), BODY), Err(SignatureError::Mismatch));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(verify(SECRET, None, BODY), Err(SignatureError::MissingHeader));
    }

    #[test]
    fn header_without_separator_is_rejected() {
        assert_eq!(verify(SECRET, Some("nodigesthere"), BODY), Err(SignatureError::Malformed));
    }

    #[test]
    fn empty_digest_is_rejected() {
        assert_eq!(verify(SECRET, Some("sha1="), BODY), Err(SignatureError::Malformed));
    }

    #[test]
    fn unsupported_algorithm_is_rejected() {
        let digest = &sign_sha1(SECRET, BODY)["sha1=".len()..];
        let header = format!("md5={digest}");
        assert_eq!(
            verify(SECRET, Some(&header), BODY),
            Err(SignatureError::UnsupportedAlgorithm("md5".into()))
        );
    }

    #[test]
    fn non_hex_digest_is_rejected() {
        assert_eq!(
            verify(SECRET, Some("sha1=zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"), BODY),
            Err(SignatureError::BadDigest)
        );
    }

    #[test]
    fn truncated_digest_is_rejected() {
        assert_eq!(verify(SECRET, Some("sha1=abcd"), BODY), Err(SignatureError::BadDigest));
    }
}
