//! SIG(0) transaction signatures (RFC 2931), Ed25519 over `ring`.
//!
//! The signature covers the SIG rdata (signature field excluded)
//! concatenated with the message as it stood before the SIG(0) record was
//! appended. The record itself is appended raw — root owner, type SIG,
//! class ANY, TTL 0 — and ARCOUNT is bumped, so the appended size is a
//! fixed [`SIG0_RR_SIZE`] bytes the finalizer can reserve up front.

use quartz_dns_domain::wire::HEADER_SIZE;
use quartz_dns_domain::DnsError;
use ring::rand::SystemRandom;
use ring::signature::{self, Ed25519KeyPair, KeyPair};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wire size of the record `sign_message` appends.
pub const SIG0_RR_SIZE: usize = RR_FIXED_LEN + RDATA_PREFIX_LEN + SIGNATURE_LEN;

const SIG0_ALGORITHM: u8 = 15; // Ed25519
const SIG0_TYPE: u16 = 24; // SIG
const SIG0_CLASS: u16 = 255; // ANY
const SIG0_VALIDITY_SECS: u32 = 300;

const RR_FIXED_LEN: usize = 11; // owner + type + class + ttl + rdlength
const RDATA_PREFIX_LEN: usize = 19; // fixed rdata fields + root signer name
const SIGNATURE_LEN: usize = 64;
const ARCOUNT_OFFSET: usize = 10;

pub struct Sig0Signer {
    key: Ed25519KeyPair,
    key_tag: u16,
}

impl Sig0Signer {
    pub fn from_pkcs8(pkcs8: &[u8]) -> Result<Self, DnsError> {
        let key = Ed25519KeyPair::from_pkcs8(pkcs8)
            .map_err(|e| DnsError::SignFailed(format!("Invalid SIG(0) key: {}", e)))?;
        let key_tag = key_tag(key.public_key().as_ref());
        Ok(Self { key, key_tag })
    }

    /// Fresh PKCS#8 key document, mainly for provisioning and tests.
    pub fn generate_pkcs8() -> Result<Vec<u8>, DnsError> {
        let rng = SystemRandom::new();
        let doc = Ed25519KeyPair::generate_pkcs8(&rng)
            .map_err(|e| DnsError::SignFailed(format!("Key generation failed: {}", e)))?;
        Ok(doc.as_ref().to_vec())
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn public_key(&self) -> &[u8] {
        self.key.public_key().as_ref()
    }

    /// Append a SIG(0) record covering `wire`; returns the extended message.
    pub fn sign_message(&self, wire: &[u8]) -> Result<Vec<u8>, DnsError> {
        if wire.len() < HEADER_SIZE {
            return Err(DnsError::SignFailed(
                "message too short to sign".to_string(),
            ));
        }

        let now = unix_time()?;
        let prefix = rdata_prefix(
            now.wrapping_add(SIG0_VALIDITY_SECS),
            now.wrapping_sub(SIG0_VALIDITY_SECS),
            self.key_tag,
        );

        let mut tbs = Vec::with_capacity(prefix.len() + wire.len());
        tbs.extend_from_slice(&prefix);
        tbs.extend_from_slice(wire);
        let sig = self.key.sign(&tbs);

        let mut out = Vec::with_capacity(wire.len() + SIG0_RR_SIZE);
        out.extend_from_slice(wire);
        out.push(0); // root owner
        out.extend_from_slice(&SIG0_TYPE.to_be_bytes());
        out.extend_from_slice(&SIG0_CLASS.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes()); // ttl
        out.extend_from_slice(&((RDATA_PREFIX_LEN + SIGNATURE_LEN) as u16).to_be_bytes());
        out.extend_from_slice(&prefix);
        out.extend_from_slice(sig.as_ref());

        let arcount = u16::from_be_bytes([out[ARCOUNT_OFFSET], out[ARCOUNT_OFFSET + 1]])
            .wrapping_add(1);
        out[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&arcount.to_be_bytes());

        Ok(out)
    }

    /// Check a trailing SIG(0) record against this signer's public key.
    /// Validity window and key tag are checked before the signature.
    pub fn verify_message(&self, signed: &[u8]) -> bool {
        if signed.len() < HEADER_SIZE + SIG0_RR_SIZE {
            return false;
        }
        let (message, rr) = signed.split_at(signed.len() - SIG0_RR_SIZE);

        if rr[0] != 0
            || rr[1..3] != SIG0_TYPE.to_be_bytes()
            || rr[3..5] != SIG0_CLASS.to_be_bytes()
        {
            return false;
        }

        let prefix = &rr[RR_FIXED_LEN..RR_FIXED_LEN + RDATA_PREFIX_LEN];
        let sig = &rr[RR_FIXED_LEN + RDATA_PREFIX_LEN..];

        let expiration = u32::from_be_bytes([prefix[8], prefix[9], prefix[10], prefix[11]]);
        let inception = u32::from_be_bytes([prefix[12], prefix[13], prefix[14], prefix[15]]);
        let tag = u16::from_be_bytes([prefix[16], prefix[17]]);
        if tag != self.key_tag {
            return false;
        }
        match unix_time() {
            Ok(now) if now >= inception && now <= expiration => {}
            _ => return false,
        }

        // The signature was computed before the record was appended, with
        // the original ARCOUNT.
        let mut original = message.to_vec();
        let arcount = u16::from_be_bytes([
            original[ARCOUNT_OFFSET],
            original[ARCOUNT_OFFSET + 1],
        ])
        .wrapping_sub(1);
        original[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&arcount.to_be_bytes());

        let mut tbs = prefix.to_vec();
        tbs.extend_from_slice(&original);

        signature::UnparsedPublicKey::new(&signature::ED25519, self.public_key())
            .verify(&tbs, sig)
            .is_ok()
    }
}

/// Uniform signing interface for the finalizer: identity when no key is
/// configured, so callers cannot tell signed and unsigned deployments apart
/// by control flow.
pub fn sign(signer: Option<&Sig0Signer>, wire: Vec<u8>) -> Result<Vec<u8>, DnsError> {
    match signer {
        Some(signer) => signer.sign_message(&wire),
        None => Ok(wire),
    }
}

/// Bytes the finalizer must leave free for the signature record.
pub fn reserved_size(signer: Option<&Sig0Signer>) -> usize {
    if signer.is_some() {
        SIG0_RR_SIZE
    } else {
        0
    }
}

fn rdata_prefix(expiration: u32, inception: u32, key_tag: u16) -> [u8; RDATA_PREFIX_LEN] {
    let mut prefix = [0u8; RDATA_PREFIX_LEN];
    // type covered (0), labels (0), original ttl (0) stay zeroed; the
    // trailing byte is the root signer name.
    prefix[2] = SIG0_ALGORITHM;
    prefix[8..12].copy_from_slice(&expiration.to_be_bytes());
    prefix[12..16].copy_from_slice(&inception.to_be_bytes());
    prefix[16..18].copy_from_slice(&key_tag.to_be_bytes());
    prefix
}

fn unix_time() -> Result<u32, DnsError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .map_err(|e| DnsError::SignFailed(format!("System clock before epoch: {}", e)))
}

/// RFC 4034 appendix B key tag over a synthesized KEY rdata.
fn key_tag(public_key: &[u8]) -> u16 {
    let mut rdata = Vec::with_capacity(4 + public_key.len());
    rdata.extend_from_slice(&[0, 0, 3, SIG0_ALGORITHM]);
    rdata.extend_from_slice(public_key);

    let mut acc: u32 = 0;
    for (i, &byte) in rdata.iter().enumerate() {
        acc += if i & 1 == 0 {
            u32::from(byte) << 8
        } else {
            u32::from(byte)
        };
    }
    acc += (acc >> 16) & 0xffff;
    (acc & 0xffff) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Sig0Signer {
        let pkcs8 = Sig0Signer::generate_pkcs8().unwrap();
        Sig0Signer::from_pkcs8(&pkcs8).unwrap()
    }

    fn fake_message() -> Vec<u8> {
        let mut wire = vec![0u8; HEADER_SIZE];
        wire[0] = 0x12;
        wire[1] = 0x34;
        wire[2] = 0x80; // QR
        wire
    }

    #[test]
    fn test_sign_appends_fixed_size() {
        let wire = fake_message();
        let signed = signer().sign_message(&wire).unwrap();
        assert_eq!(signed.len(), wire.len() + SIG0_RR_SIZE);
        assert_eq!(&signed[..wire.len()], &wire[..]);
    }

    #[test]
    fn test_sign_bumps_arcount() {
        let signed = signer().sign_message(&fake_message()).unwrap();
        let arcount = u16::from_be_bytes([signed[10], signed[11]]);
        assert_eq!(arcount, 1);
    }

    #[test]
    fn test_sign_then_verify() {
        let signer = signer();
        let signed = signer.sign_message(&fake_message()).unwrap();
        assert!(signer.verify_message(&signed));
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let signer = signer();
        let mut signed = signer.sign_message(&fake_message()).unwrap();
        signed[0] ^= 0xff;
        assert!(!signer.verify_message(&signed));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let signed = signer().sign_message(&fake_message()).unwrap();
        assert!(!signer().verify_message(&signed));
    }

    #[test]
    fn test_unsigned_message_fails_verification() {
        assert!(!signer().verify_message(&fake_message()));
    }

    #[test]
    fn test_no_key_is_identity() {
        let wire = fake_message();
        let out = sign(None, wire.clone()).unwrap();
        assert_eq!(out, wire);
        assert_eq!(reserved_size(None), 0);
    }

    #[test]
    fn test_reservation_matches_appended_size() {
        let signer = signer();
        let wire = fake_message();
        let signed = sign(Some(&signer), wire.clone()).unwrap();
        assert_eq!(signed.len() - wire.len(), reserved_size(Some(&signer)));
    }

    #[test]
    fn test_too_short_message_rejected() {
        let result = signer().sign_message(&[0u8; 4]);
        assert!(matches!(result, Err(DnsError::SignFailed(_))));
    }

    #[test]
    fn test_rr_size_constant() {
        assert_eq!(SIG0_RR_SIZE, 94);
    }
}
