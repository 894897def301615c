use super::model::Contract;
use crate::error::{CoreError, CoreResult};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Immutable, ordered set of contracts loaded for one session.
///
/// Order is whatever the source returned (amount descending for the hosted
/// table). `contract_number` is unique; construction fails otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Contract>,
    fingerprint: String,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Contract>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for c in &records {
            if !seen.insert(c.contract_number.as_str()) {
                tracing::warn!(
                    contract_number = %c.contract_number,
                    "rejecting dataset with duplicate contract_number"
                );
                return Err(CoreError::DuplicateContractNumber(c.contract_number.clone()));
            }
        }
        let fingerprint = fingerprint_records(&records)?;
        Ok(Self {
            records,
            fingerprint,
        })
    }

    pub fn records(&self) -> &[Contract] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, contract_number: &str) -> Option<&Contract> {
        self.records
            .iter()
            .find(|c| c.contract_number == contract_number)
    }

    pub fn contains(&self, contract_number: &str) -> bool {
        self.get(contract_number).is_some()
    }

    /// Hex SHA-256 over the serialized rows; empty for an empty dataset.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_records(records: &[Contract]) -> CoreResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }
    let bytes = serde_json::to_vec(records)?;
    let mut h = Sha256::new();
    h.update(&bytes);
    Ok(hex::encode(h.finalize()))
}
