use serde::{Deserialize, Serialize};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub rpc_url: String,
    pub registry_address: String,
    pub chain_id: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            registry_address: ZERO_ADDRESS.to_string(),
            chain_id: 31337,
        }
    }
}

impl RegistryConfig {
    pub fn localhost(registry: impl Into<String>) -> Self {
        Self {
            registry_address: registry.into(),
            ..Self::default()
        }
    }

    pub fn sepolia(registry: impl Into<String>) -> Self {
        Self {
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            registry_address: registry.into(),
            chain_id: 11155111,
        }
    }

    pub fn mainnet(registry: impl Into<String>) -> Self {
        Self {
            rpc_url: "https://ethereum-rpc.publicnode.com".to_string(),
            registry_address: registry.into(),
            chain_id: 1,
        }
    }
}
