use super::bindings::LivenessRegistry;
use super::config::RegistryConfig;
use crate::store::RegistryStore;
use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::Address,
    utils::to_checksum,
};
use liveid_types::{LiveIdError, LiveIdResult};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct RegistryClient {
    rpc_url: String,
    provider: Option<Arc<Provider<Http>>>,
    signer: Option<Arc<SignerMiddleware<Provider<Http>, LocalWallet>>>,
    registry_address: Address,
    chain_id: u64,
}

impl RegistryClient {
    pub fn new(config: &RegistryConfig) -> LiveIdResult<Self> {
        let registry_address = config
            .registry_address
            .parse::<Address>()
            .map_err(|e| LiveIdError::Config(format!("Invalid registry address: {}", e)))?;

        Ok(Self {
            rpc_url: config.rpc_url.clone(),
            provider: None,
            signer: None,
            registry_address,
            chain_id: config.chain_id,
        })
    }

    pub async fn connect(&mut self) -> LiveIdResult<()> {
        info!("Connecting to RPC: {}", self.rpc_url);

        let provider = Provider::<Http>::try_from(self.rpc_url.as_str())
            .map_err(|e| LiveIdError::Network(format!("Failed to create provider: {}", e)))?;

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| LiveIdError::Network(format!("Failed to get chain ID: {}", e)))?;

        if chain_id.as_u64() != self.chain_id {
            return Err(LiveIdError::Network(format!(
                "Chain ID mismatch: expected {}, got {}",
                self.chain_id,
                chain_id.as_u64()
            )));
        }

        self.provider = Some(Arc::new(provider));

        info!("Connected to chain {}", self.chain_id);
        Ok(())
    }

    /// Attaches a signing wallet and returns its checksummed address,
    /// the string callers pass around as the record owner.
    pub async fn set_wallet(&mut self, private_key: &str) -> LiveIdResult<String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| LiveIdError::Network("Not connected".into()))?
            .clone();

        let wallet: LocalWallet = private_key
            .parse()
            .map_err(|e| LiveIdError::Wallet(format!("Invalid private key: {}", e)))?;

        let wallet = wallet.with_chain_id(self.chain_id);
        let address = to_checksum(&wallet.address(), None);

        let client = SignerMiddleware::new((*provider).clone(), wallet);
        self.signer = Some(Arc::new(client));

        info!("Wallet set: {}", address);
        Ok(address)
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    pub fn has_wallet(&self) -> bool {
        self.signer.is_some()
    }

    pub fn registry_address(&self) -> Address {
        self.registry_address
    }
}

#[async_trait]
impl RegistryStore for RegistryClient {
    async fn read(&self, key: &str) -> LiveIdResult<Vec<u8>> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| LiveIdError::Network("Not connected".into()))?;

        let registry = LivenessRegistry::new(self.registry_address, provider.clone());

        debug!("getData {}", key);
        let bytes = registry
            .get_data(key.to_string())
            .call()
            .await
            .map_err(|e| LiveIdError::Contract(format!("Failed to read {}: {}", key, e)))?;

        Ok(bytes.to_vec())
    }

    async fn write(&self, key: &str, value: &[u8]) -> LiveIdResult<()> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| LiveIdError::Wallet("No wallet configured".into()))?;

        let registry = LivenessRegistry::new(self.registry_address, signer.clone());

        debug!("setData {} ({} bytes)", key, value.len());
        let call = registry.set_data(key.to_string(), value.to_vec().into());
        let pending = call
            .send()
            .await
            .map_err(|e| LiveIdError::Contract(describe_send_failure(key, &e.to_string())))?;

        let receipt = pending
            .await
            .map_err(|e| {
                LiveIdError::Contract(format!("Transaction for {} failed: {}", key, e))
            })?
            .ok_or_else(|| LiveIdError::Contract(format!("No receipt for {}", key)))?;

        debug!("setData {} confirmed: {:?}", key, receipt.transaction_hash);
        Ok(())
    }

    async fn is_available(&self) -> LiveIdResult<bool> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| LiveIdError::Network("Not connected".into()))?;

        let registry = LivenessRegistry::new(self.registry_address, provider.clone());

        registry
            .is_available()
            .call()
            .await
            .map_err(|e| LiveIdError::Contract(format!("Availability check failed: {}", e)))
    }
}

/// Wallet frontends bubble up "user rejected" when the holder declines
/// to sign; callers show that verbatim, so keep the message stable.
pub(crate) fn describe_send_failure(key: &str, message: &str) -> String {
    if message.contains("user rejected") {
        "Transaction rejected by user".to_string()
    } else {
        format!("Failed to write {}: {}", key, message)
    }
}
