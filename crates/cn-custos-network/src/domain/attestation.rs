//! # Attestation Book
//!
//! Append-only attestation lists keyed by proof hash, with a side index
//! enforcing one attestation per validator per proof hash.

use super::error::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp};
use std::collections::{HashMap, HashSet};

/// One validator's recorded claim about one proof hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub validator: Address,
    pub valid: bool,
    pub timestamp: Timestamp,
}

/// All recorded attestations plus the per-validator uniqueness index.
#[derive(Debug, Default)]
pub struct AttestationBook {
    by_proof: HashMap<Hash, Vec<Attestation>>,
    seen: HashSet<(Hash, Address)>,
}

impl AttestationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attestation. A validator may attest a given proof hash at
    /// most once, regardless of the claimed value.
    pub fn record(
        &mut self,
        proof_hash: Hash,
        validator: Address,
        valid: bool,
        timestamp: Timestamp,
    ) -> NetworkResult<()> {
        if !self.seen.insert((proof_hash, validator)) {
            return Err(NetworkError::AlreadyAttested);
        }
        self.by_proof.entry(proof_hash).or_default().push(Attestation {
            validator,
            valid,
            timestamp,
        });
        Ok(())
    }

    /// Whether the validator already holds a record for this proof hash.
    pub fn has_attested(&self, proof_hash: &Hash, validator: &Address) -> bool {
        self.seen.contains(&(*proof_hash, *validator))
    }

    pub fn for_proof(&self, proof_hash: &Hash) -> &[Attestation] {
        self.by_proof.get(proof_hash).map_or(&[], Vec::as_slice)
    }

    /// Direct access to a proof's record list, for tests that need to plant
    /// histories the entry points cannot produce.
    #[cfg(test)]
    pub(crate) fn records_mut(&mut self, proof_hash: Hash) -> &mut Vec<Attestation> {
        self.by_proof.entry(proof_hash).or_default()
    }

    /// Whether the named validator has both a `true` and a `false` record
    /// for this proof hash.
    ///
    /// The uniqueness index in [`AttestationBook::record`] makes this
    /// condition impossible to reach through the public entry points; the
    /// scan is retained so the slashing path checks exactly the condition
    /// it penalizes rather than assuming it.
    pub fn has_equivocation(&self, proof_hash: &Hash, validator: &Address) -> bool {
        let records = self.for_proof(proof_hash);
        let claimed_true = records
            .iter()
            .any(|a| a.validator == *validator && a.valid);
        let claimed_false = records
            .iter()
            .any(|a| a.validator == *validator && !a.valid);
        claimed_true && claimed_false
    }
}
