//! Keyed-hash commitments for the commit-reveal scheme.
//!
//! proof = HMAC-SHA256(secret_key, decimal(value))

use super::entropy::EntropySource;
use crate::error::ProtocolError;
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Secret key for a single commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "hex_bytes")] [u8; 32]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string
    pub fn from_hex(text: &str) -> Option<Self> {
        decode_32(text).map(Self)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Published proof binding a value to a secret key
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof(#[serde(with = "hex_bytes")] [u8; 32]);

impl Proof {
    /// Compute the proof for a value under a key
    pub fn compute(key: &SecretKey, value: u8) -> Self {
        Self(keyed_hash(key, value).finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string
    pub fn from_hex(text: &str) -> Option<Self> {
        decode_32(text).map(Self)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given key and value produce this proof
    pub fn verify(&self, key: &SecretKey, value: u8) -> bool {
        verify(key, value, self)
    }
}

impl fmt::Debug for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proof({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A freshly committed value. Only the proof may be shown before reveal.
#[derive(Debug)]
pub struct Commitment {
    key: SecretKey,
    value: u8,
    proof: Proof,
}

impl Commitment {
    /// Commit to `value` under a freshly drawn key.
    ///
    /// `value` must lie in `0..modulus`.
    pub fn commit<E: EntropySource + ?Sized>(
        entropy: &mut E,
        value: u8,
        modulus: u8,
    ) -> Result<Self, ProtocolError> {
        if value >= modulus {
            return Err(ProtocolError::ValueOutOfRange { value, modulus });
        }
        Ok(Self::with_key(entropy.secret_key(), value))
    }

    /// Draw a uniform value in `0..modulus` and commit to it
    pub fn random<E: EntropySource + ?Sized>(entropy: &mut E, modulus: u8) -> Self {
        let value = entropy.below(modulus);
        Self::with_key(entropy.secret_key(), value)
    }

    /// Commit to `value` under a caller-supplied key
    pub fn with_key(key: SecretKey, value: u8) -> Self {
        let proof = Proof::compute(&key, value);
        Self { key, value, proof }
    }

    /// The proof to publish to the counterparty
    pub fn proof(&self) -> &Proof {
        &self.proof
    }

    /// Open the commitment, consuming it
    pub fn reveal(self) -> Reveal {
        Reveal {
            key: self.key,
            value: self.value,
        }
    }
}

/// An opened commitment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub key: SecretKey,
    pub value: u8,
}

impl Reveal {
    /// Check this reveal against a previously published proof
    pub fn verify(&self, proof: &Proof) -> bool {
        verify(&self.key, self.value, proof)
    }
}

/// Recompute the keyed hash and compare in constant time
pub fn verify(key: &SecretKey, value: u8, proof: &Proof) -> bool {
    keyed_hash(key, value)
        .verify_slice(proof.as_bytes())
        .is_ok()
}

/// Verify untrusted hex text. Malformed input fails verification.
pub fn verify_hex(key_hex: &str, value: &str, proof_hex: &str) -> bool {
    let Some(key) = SecretKey::from_hex(key_hex) else {
        return false;
    };
    let Ok(value) = value.trim().parse::<u8>() else {
        return false;
    };
    let Ok(proof) = hex::decode(proof_hex.trim()) else {
        return false;
    };
    keyed_hash(&key, value).verify_slice(&proof).is_ok()
}

/// Keys shorter than the SHA-256 block are zero-padded, as HMAC does itself.
fn keyed_hash(key: &SecretKey, value: u8) -> HmacSha256 {
    let mut block = Key::<HmacSha256>::default();
    block[..key.as_bytes().len()].copy_from_slice(key.as_bytes());
    let mut mac = <HmacSha256 as KeyInit>::new(&block);
    mac.update(value.to_string().as_bytes());
    mac
}

fn decode_32(text: &str) -> Option<[u8; 32]> {
    let bytes = hex::decode(text.trim()).ok()?;
    bytes.try_into().ok()
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}
