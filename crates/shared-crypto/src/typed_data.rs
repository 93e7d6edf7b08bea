//! # Typed-Data Digests
//!
//! EIP-712-style structured signing: a struct hash is bound to a
//! domain separator (name, version, chain id, verifying contract) and
//! prefixed with `0x19 0x01` before the final Keccak-256. A signature over
//! the result is valid for exactly one struct instance in exactly one
//! deployment.

use crate::hashing::{keccak256, keccak256_many};
use shared_types::{Address, Hash};

/// Signing domain for typed-data digests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl TypedDomain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// Domain separator:
    /// `keccak256(domainTypeHash || keccak(name) || keccak(version) || chainId || contract)`.
    pub fn separator(&self) -> Hash {
        let type_hash = keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );
        keccak256_many(&[
            &type_hash,
            &keccak256(self.name.as_bytes()),
            &keccak256(self.version.as_bytes()),
            &uint256(self.chain_id),
            &address_word(self.verifying_contract),
        ])
    }

    /// Final digest: `keccak256(0x19 0x01 || separator || structHash)`.
    pub fn digest(&self, struct_hash: Hash) -> Hash {
        keccak256_many(&[&[0x19, 0x01], &self.separator(), &struct_hash])
    }
}

/// Encode a u64 as a 32-byte big-endian word.
pub fn uint256(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode an address as a left-padded 32-byte word.
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&address);
    word
}
