//! SSO handshake payload and HMAC-SHA256 signatures.
//!
//! The identity provider posts back a hex-encoded JSON payload together with
//! a hex-encoded HMAC-SHA256 of the raw payload bytes, keyed with the
//! domain's shared secret (itself hex-encoded).

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::error;

use super::AuthError;
use crate::domain::commenter::{ProfileUpdate, UNDEFINED};
use crate::domain::foundation::SsoToken;
use crate::domain::site::SsoSecret;

type HmacSha256 = Hmac<Sha256>;

/// Identity asserted by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SsoPayload {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "undefined")]
    pub link: String,
    #[serde(default = "undefined")]
    pub photo: String,
}

fn undefined() -> String {
    UNDEFINED.to_string()
}

impl SsoPayload {
    /// Parses the decoded payload bytes.
    ///
    /// `token`, `email` and `name` are required; `link` and `photo` default
    /// to `"undefined"`.
    pub fn parse(bytes: &[u8]) -> Result<Self, AuthError> {
        let payload: SsoPayload = serde_json::from_slice(bytes)
            .map_err(|e| AuthError::invalid_payload(format!("malformed JSON: {}", e)))?;

        for (field, value) in [
            ("token", &payload.token),
            ("email", &payload.email),
            ("name", &payload.name),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::missing(field));
            }
        }
        Ok(payload)
    }

    pub fn token(&self) -> Result<SsoToken, AuthError> {
        Ok(SsoToken::new(self.token.clone())?)
    }

    /// Profile attributes to store on the resolved commenter.
    pub fn profile(&self) -> ProfileUpdate {
        ProfileUpdate {
            email: self.email.clone(),
            name: self.name.clone(),
            link: self.link.clone(),
            photo: self.photo.clone(),
        }
    }
}

/// Decodes a hex-encoded request field.
pub fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, AuthError> {
    if value.is_empty() {
        return Err(AuthError::missing(field));
    }
    hex::decode(value).map_err(|e| AuthError::invalid_payload(format!("{}: {}", field, e)))
}

/// Signs and verifies handshake messages with a domain's secret.
pub struct SsoSigner {
    key: Vec<u8>,
}

impl SsoSigner {
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Builds a signer from the domain's hex-encoded secret.
    pub fn from_secret(secret: &SsoSecret) -> Result<Self, AuthError> {
        let key = hex::decode(secret.expose()).map_err(|e| {
            error!(error = %e, "domain SSO secret is not valid hex");
            AuthError::Internal
        })?;
        Ok(Self::new(key))
    }

    /// Computes the HMAC-SHA256 of `message`.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|e| {
            error!(error = %e, "cannot key HMAC");
            AuthError::Internal
        })?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Checks `signature` against `message` in constant time.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), AuthError> {
        let expected = self.sign(message)?;
        if constant_time_eq(&expected, signature) {
            Ok(())
        } else {
            Err(AuthError::SignatureMismatch)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_HEX: &str = "0123456789abcdef0123456789abcdef";

    fn signer() -> SsoSigner {
        SsoSigner::from_secret(&SsoSecret::new(SECRET_HEX)).unwrap()
    }

    #[test]
    fn payload_defaults_link_and_photo() {
        let p = SsoPayload::parse(br#"{"token":"t","email":"a@b.c","name":"A"}"#).unwrap();
        assert_eq!(p.link, "undefined");
        assert_eq!(p.photo, "undefined");
    }

    #[test]
    fn payload_requires_token_email_and_name() {
        let err = SsoPayload::parse(br#"{"token":"t","email":"","name":"A"}"#).unwrap_err();
        assert_eq!(err, AuthError::MissingField("email".into()));

        let err = SsoPayload::parse(br#"{"email":"a@b.c","name":"A"}"#).unwrap_err();
        assert_eq!(err, AuthError::MissingField("token".into()));
    }

    #[test]
    fn malformed_json_is_invalid_payload() {
        assert!(matches!(
            SsoPayload::parse(b"not json"),
            Err(AuthError::InvalidPayload(_))
        ));
    }

    #[test]
    fn decode_hex_rejects_garbage() {
        assert!(matches!(
            decode_hex("payload", "zz"),
            Err(AuthError::InvalidPayload(_))
        ));
        assert_eq!(decode_hex("hmac", "0aff").unwrap(), vec![0x0a, 0xff]);
    }

    #[test]
    fn signature_round_trips() {
        let s = signer();
        let sig = s.sign(b"payload").unwrap();
        assert_eq!(sig.len(), 32);
        assert!(s.verify(b"payload", &sig).is_ok());
    }

    #[test]
    fn tampered_message_is_rejected() {
        let s = signer();
        let sig = s.sign(b"payload").unwrap();
        assert_eq!(s.verify(b"paylaod", &sig), Err(AuthError::SignatureMismatch));
        assert_eq!(s.verify(b"payload", &sig[..31]), Err(AuthError::SignatureMismatch));
    }

    #[test]
    fn invalid_secret_is_internal() {
        assert!(matches!(
            SsoSigner::from_secret(&SsoSecret::new("not-hex")),
            Err(AuthError::Internal)
        ));
    }
}
