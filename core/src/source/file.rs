use super::{parse_contract_rows, ContractSource};
use crate::contracts::model::Contract;
use crate::error::CoreResult;
use std::path::{Path, PathBuf};

/// Reads a JSON array of contract rows from disk, e.g. an exported table snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ContractSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch_all(&self) -> CoreResult<Vec<Contract>> {
        tracing::info!(source = %self.describe(), "reading contracts");
        let body = std::fs::read_to_string(&self.path)?;
        parse_contract_rows(&body)
    }
}
