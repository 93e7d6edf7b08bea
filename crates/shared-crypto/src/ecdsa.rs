//! # ECDSA Recovery (secp256k1)
//!
//! Signature recovery for verifier-signed claims: given a 32-byte digest and
//! a 65-byte r||s||v signature, recover the Ethereum-style signer address
//! and compare it against the configured verifier.
//!
//! Recovery is modeled as a trait port so tests can substitute deterministic
//! key material or a rejecting stub.

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{Address, Hash};

/// A 65-byte signature in r||s||v wire form (v in {0, 1, 27, 28}).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireSignature(pub [u8; 65]);

impl WireSignature {
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }
}

/// Signer-recovery port: recover the address that produced `signature`
/// over `digest`.
pub trait SignerRecovery {
    fn recover(&self, digest: &Hash, signature: &WireSignature) -> Result<Address, CryptoError>;
}

/// Production recovery over secp256k1.
#[derive(Clone, Copy, Debug, Default)]
pub struct EcdsaRecovery;

impl SignerRecovery for EcdsaRecovery {
    fn recover(&self, digest: &Hash, signature: &WireSignature) -> Result<Address, CryptoError> {
        recover_address(digest, signature)
    }
}

/// Recover the Ethereum-style address for a digest/signature pair.
pub fn recover_address(
    digest: &Hash,
    signature: &WireSignature,
) -> Result<Address, CryptoError> {
    let bytes = signature.as_bytes();
    let sig =
        Signature::from_slice(&bytes[..64]).map_err(|_| CryptoError::MalformedSignature)?;

    let v = bytes[64];
    let recovery_byte = if v >= 27 { v - 27 } else { v };
    let recovery_id =
        RecoveryId::from_byte(recovery_byte).ok_or(CryptoError::InvalidRecoveryId(v))?;

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(address_of(&key))
}

/// Ethereum address: last 20 bytes of keccak256 of the uncompressed point.
fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// secp256k1 keypair for producing verifier signatures (tests, tooling).
pub struct SignerKeyPair {
    signing_key: SigningKey,
}

impl SignerKeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_bytes((&bytes).into())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// The keypair's Ethereum-style address.
    pub fn address(&self) -> Address {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, returning the 65-byte wire form.
    pub fn sign_digest(&self, digest: &Hash) -> WireSignature {
        // RFC 6979 deterministic; recoverable signing cannot fail for a
        // valid key and 32-byte prehash
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .expect("recoverable signing over a 32-byte prehash");

        let mut wire = [0u8; 65];
        wire[..64].copy_from_slice(&sig.to_bytes());
        wire[64] = recovery_id.to_byte();
        WireSignature(wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_recover() {
        let keypair = SignerKeyPair::generate();
        let digest = keccak256(b"claim digest");

        let signature = keypair.sign_digest(&digest);
        let recovered = recover_address(&digest, &signature).unwrap();

        assert_eq!(recovered, keypair.address());
    }

    #[test]
    fn test_wrong_digest_recovers_other_address() {
        let keypair = SignerKeyPair::generate();
        let signature = keypair.sign_digest(&keccak256(b"digest one"));

        let recovered = recover_address(&keccak256(b"digest two"), &signature);
        // recovery may fail outright or produce some other address; it must
        // never yield the signer
        if let Ok(address) = recovered {
            assert_ne!(address, keypair.address());
        }
    }

    #[test]
    fn test_legacy_v_values_accepted() {
        let keypair = SignerKeyPair::generate();
        let digest = keccak256(b"legacy v");

        let mut wire = *keypair.sign_digest(&digest).as_bytes();
        wire[64] += 27; // Ethereum legacy encoding
        let recovered = recover_address(&digest, &WireSignature(wire)).unwrap();

        assert_eq!(recovered, keypair.address());
    }

    #[test]
    fn test_invalid_recovery_id_rejected() {
        let keypair = SignerKeyPair::generate();
        let digest = keccak256(b"bad recid");

        let mut wire = *keypair.sign_digest(&digest).as_bytes();
        wire[64] = 9;
        let err = recover_address(&digest, &WireSignature(wire)).unwrap_err();

        assert_eq!(err, CryptoError::InvalidRecoveryId(9));
    }

    #[test]
    fn test_deterministic_from_bytes() {
        let a = SignerKeyPair::from_bytes([0x11; 32]).unwrap();
        let b = SignerKeyPair::from_bytes([0x11; 32]).unwrap();
        assert_eq!(a.address(), b.address());
    }
}
