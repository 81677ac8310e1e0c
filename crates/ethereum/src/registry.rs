//! Metadata for every bundled contract binding

use std::fmt;
use std::sync::{Arc, OnceLock};

use ethers::abi::Abi;
use ethers::types::Bytes;

use bindings_core::{Error, Result};

use crate::contracts::{
    aggregator_proxy, ens_interface, flags, flags_interface, link_token, mock_v3_aggregator,
    reward_lib,
};

/// ABI and optional creation bytecode of a contract
///
/// The ABI is parsed on first use and shared afterwards.
pub struct ContractMetadata {
    name: &'static str,
    abi: &'static str,
    bin: Option<&'static str>,
    parsed: OnceLock<Arc<Abi>>,
}

impl ContractMetadata {
    pub const fn new(name: &'static str, abi: &'static str, bin: Option<&'static str>) -> Self {
        Self {
            name,
            abi,
            bin,
            parsed: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The ABI as JSON text
    pub fn abi_json(&self) -> &'static str {
        self.abi
    }

    /// Whether creation bytecode is bundled
    pub fn is_deployable(&self) -> bool {
        self.bin.is_some()
    }

    pub fn abi(&self) -> Result<Arc<Abi>> {
        if let Some(abi) = self.parsed.get() {
            return Ok(abi.clone());
        }
        let abi: Abi = serde_json::from_str(self.abi)
            .map_err(|e| Error::abi(format!("Invalid ABI for {}: {}", self.name, e)))?;
        Ok(self.parsed.get_or_init(|| Arc::new(abi)).clone())
    }

    /// Creation bytecode
    pub fn bytecode(&self) -> Result<Bytes> {
        let bin = self
            .bin
            .ok_or_else(|| Error::config(format!("{} has no bundled bytecode", self.name)))?;
        let bin = bin.trim();
        let bytes = hex::decode(bin.strip_prefix("0x").unwrap_or(bin))
            .map_err(|e| Error::abi(format!("Invalid bytecode for {}: {}", self.name, e)))?;
        Ok(Bytes::from(bytes))
    }
}

impl fmt::Debug for ContractMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractMetadata")
            .field("name", &self.name)
            .field("deployable", &self.is_deployable())
            .finish()
    }
}

static CONTRACTS: [&ContractMetadata; 7] = [
    &aggregator_proxy::METADATA,
    &ens_interface::METADATA,
    &flags::METADATA,
    &flags_interface::METADATA,
    &link_token::METADATA,
    &mock_v3_aggregator::METADATA,
    &reward_lib::METADATA,
];

/// Every bundled contract, sorted by name
pub fn all() -> &'static [&'static ContractMetadata] {
    &CONTRACTS
}

/// Find a bundled contract by name, ignoring ASCII case
pub fn lookup(name: &str) -> Option<&'static ContractMetadata> {
    CONTRACTS
        .iter()
        .copied()
        .find(|metadata| metadata.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bundled_abi_parses() {
        for metadata in all() {
            let abi = metadata.abi().unwrap();
            assert!(
                abi.functions().next().is_some() || abi.events().next().is_some(),
                "{} has an empty ABI",
                metadata.name()
            );
        }
    }

    #[test]
    fn test_bytecode_for_deployable_contracts() {
        for metadata in all() {
            if metadata.is_deployable() {
                assert!(!metadata.bytecode().unwrap().is_empty(), "{}", metadata.name());
            } else {
                assert!(matches!(metadata.bytecode(), Err(Error::Config(_))));
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("LinkToken").map(|m| m.name()), Some("LinkToken"));
        assert_eq!(lookup("linktoken").map(|m| m.name()), Some("LinkToken"));
        assert!(lookup("Oracle").is_none());
    }

    #[test]
    fn test_abi_is_parsed_once() {
        let first = flags::METADATA.abi().unwrap();
        let second = flags::METADATA.abi().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
