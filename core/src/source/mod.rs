pub mod endpoint;
pub mod file;
pub mod postgrest;

use crate::contracts::model::Contract;
use crate::error::{CoreError, CoreResult};

/// A read-only origin for the full contract list.
pub trait ContractSource {
    /// Short human-readable origin for logs; must not contain credentials.
    fn describe(&self) -> String;
    /// Every contract in the source's own order (amount descending, nulls last,
    /// for the hosted table).
    fn fetch_all(&self) -> CoreResult<Vec<Contract>>;
}

/// Parses a JSON array of table rows.
pub fn parse_contract_rows(body: &str) -> CoreResult<Vec<Contract>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let rows = value
        .as_array()
        .ok_or_else(|| CoreError::Source("expected a JSON array of contract rows".to_string()))?;

    let mut out = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let contract: Contract = serde_json::from_value(row.clone()).map_err(|e| {
            CoreError::Source(format!("invalid contract row at index {}: {}", idx, e))
        })?;
        out.push(contract);
    }
    Ok(out)
}
