use async_trait::async_trait;
use liveid_types::{LiveIdError, LiveIdResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Untyped key-value access to the registry. Keys map to opaque byte
/// values; a missing key reads back as empty bytes, the same shape the
/// on-chain contract returns for unset storage.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    async fn read(&self, key: &str) -> LiveIdResult<Vec<u8>>;

    async fn write(&self, key: &str, value: &[u8]) -> LiveIdResult<()>;

    async fn is_available(&self) -> LiveIdResult<bool>;
}

/// In-memory registry used by tests and local development. Clones share
/// the same underlying map.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    unreadable: Arc<RwLock<HashSet<String>>>,
    available: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            unreadable: Arc::new(RwLock::new(HashSet::new())),
            available: Arc::new(AtomicBool::new(true)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Marks a key so that reads of it fail with a transport error.
    pub async fn poison_key(&self, key: &str) {
        self.unreadable.write().await.insert(key.to_string());
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn read(&self, key: &str) -> LiveIdResult<Vec<u8>> {
        if self.unreadable.read().await.contains(key) {
            return Err(LiveIdError::Network(format!(
                "Simulated read failure for {}",
                key
            )));
        }
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn write(&self, key: &str, value: &[u8]) -> LiveIdResult<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(LiveIdError::Contract("Simulated write rejection".into()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn is_available(&self) -> LiveIdResult<bool> {
        Ok(self.available.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        store.write("identity_1-aaaaaaa", b"payload").await.unwrap();
        assert_eq!(
            store.read("identity_1-aaaaaaa").await.unwrap(),
            b"payload".to_vec()
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.read("identity_keys").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.write("k", b"v").await.unwrap();
        assert_eq!(other.read("k").await.unwrap(), b"v".to_vec());
    }

    #[tokio::test]
    async fn test_poisoned_key_fails_reads() {
        let store = MemoryStore::new();
        store.write("k", b"v").await.unwrap();
        store.poison_key("k").await;

        assert!(matches!(
            store.read("k").await,
            Err(LiveIdError::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_write_failure_toggle() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);

        assert!(matches!(
            store.write("k", b"v").await,
            Err(LiveIdError::Contract(_))
        ));

        store.set_fail_writes(false);
        store.write("k", b"v").await.unwrap();
    }

    #[tokio::test]
    async fn test_availability_toggle() {
        let store = MemoryStore::new();
        assert!(store.is_available().await.unwrap());

        store.set_available(false);
        assert!(!store.is_available().await.unwrap());
    }
}
