//! The static contract collection
//!
//! Parsed once from the `contracts.json` document and shared read-only by the
//! list and detail views.

use std::sync::Arc;

use contract_types::Contract;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone)]
pub struct ContractCatalog {
    contracts: Arc<[Contract]>,
}

impl ContractCatalog {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self {
            contracts: contracts.into(),
        }
    }

    /// Parse a JSON array of contract records
    pub fn from_json(json: &str) -> Result<Self> {
        let contracts: Vec<Contract> = serde_json::from_str(json)?;
        Ok(Self::new(contracts))
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn find(&self, id: &str) -> Result<&Contract> {
        self.contracts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))
    }
}

impl From<Arc<[Contract]>> for ContractCatalog {
    fn from(contracts: Arc<[Contract]>) -> Self {
        Self { contracts }
    }
}
