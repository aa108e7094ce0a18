use super::client::describe_send_failure;
use super::*;
use crate::store::RegistryStore;
use liveid_types::LiveIdError;

#[test]
fn test_registry_config_default() {
    let config = RegistryConfig::default();
    assert_eq!(config.chain_id, 31337);
    assert!(config.rpc_url.contains("localhost"));
    assert_eq!(config.registry_address, ZERO_ADDRESS);
}

#[test]
fn test_registry_config_chains() {
    let localhost = RegistryConfig::localhost(ZERO_ADDRESS);
    assert_eq!(localhost.chain_id, 31337);

    let sepolia = RegistryConfig::sepolia(ZERO_ADDRESS);
    assert_eq!(sepolia.chain_id, 11155111);
    assert!(sepolia.rpc_url.contains("sepolia"));

    let mainnet = RegistryConfig::mainnet(ZERO_ADDRESS);
    assert_eq!(mainnet.chain_id, 1);
}

#[test]
fn test_client_creation() {
    let client = RegistryClient::new(&RegistryConfig::default()).unwrap();
    assert!(!client.is_connected());
    assert!(!client.has_wallet());
}

#[test]
fn test_client_rejects_bad_address() {
    let config = RegistryConfig::localhost("not an address");
    let err = RegistryClient::new(&config).unwrap_err();
    assert!(matches!(err, LiveIdError::Config(_)));
}

#[tokio::test]
async fn test_read_requires_connection() {
    let client = RegistryClient::new(&RegistryConfig::default()).unwrap();
    let err = client.read("identity_keys").await.unwrap_err();
    assert!(matches!(err, LiveIdError::Network(_)));
}

#[tokio::test]
async fn test_write_requires_wallet() {
    let client = RegistryClient::new(&RegistryConfig::default()).unwrap();
    let err = client.write("identity_keys", b"[]").await.unwrap_err();
    assert!(matches!(err, LiveIdError::Wallet(_)));
}

#[test]
fn test_user_rejection_message_is_normalized() {
    let message = describe_send_failure("identity_keys", "user rejected transaction");
    assert_eq!(message, "Transaction rejected by user");

    let other = describe_send_failure("identity_keys", "nonce too low");
    assert!(other.contains("identity_keys"));
    assert!(other.contains("nonce too low"));
}
