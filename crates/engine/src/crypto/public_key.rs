//! X.509 parsing and public-key export backed by OpenSSL.

use openssl::x509::X509;

use crate::domain::error::{PinError, PinResult};
use crate::domain::types::ExtractedPublicKey;

const PEM_MARKER: &[u8] = b"-----BEGIN";

pub fn parse_certificate(der: &[u8]) -> PinResult<X509> {
    if der.is_empty() {
        return Err(PinError::CertificateParse("empty certificate".into()));
    }
    X509::from_der(der).map_err(|e| PinError::CertificateParse(e.to_string()))
}

/// Parse a certificate and export its key as DER SubjectPublicKeyInfo.
pub fn try_extract_public_key(der: &[u8]) -> PinResult<ExtractedPublicKey> {
    let cert = parse_certificate(der)?;
    let key = cert.public_key()?;
    Ok(ExtractedPublicKey::new(key.public_key_to_der()?))
}

/// Like [`try_extract_public_key`], but any failure yields `None`.
pub fn extract_public_key(der: &[u8]) -> Option<ExtractedPublicKey> {
    match try_extract_public_key(der) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::debug!(error = %e, "public key extraction failed");
            None
        }
    }
}

/// DER bytes of a bundled certificate resource. PEM armour is stripped,
/// DER input is returned unchanged.
pub fn certificate_der(bytes: &[u8]) -> PinResult<Vec<u8>> {
    if is_pem(bytes) {
        let cert = X509::from_pem(bytes).map_err(|e| PinError::CertificateParse(e.to_string()))?;
        return Ok(cert.to_der()?);
    }
    Ok(bytes.to_vec())
}

fn is_pem(bytes: &[u8]) -> bool {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    bytes[start..].starts_with(PEM_MARKER)
}
