use crate::codec::{decode_index, encode_index};
use crate::store::RegistryStore;
use liveid_types::{LiveIdResult, RecordId, INDEX_KEY};
use tracing::{debug, warn};

/// Reads the id index. A missing index is an empty one, and an index
/// that no longer parses is discarded and read as empty.
pub async fn load_index<S: RegistryStore + ?Sized>(store: &S) -> LiveIdResult<Vec<RecordId>> {
    let bytes = store.read(INDEX_KEY).await?;

    match decode_index(&bytes) {
        Ok(ids) => Ok(ids),
        Err(e) => {
            warn!("Discarding unreadable index: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Appends an id to the index with a read-modify-write cycle. The cycle
/// is not atomic: two concurrent writers can lose one of their appends.
pub async fn append_index<S: RegistryStore + ?Sized>(
    store: &S,
    id: &RecordId,
) -> LiveIdResult<()> {
    let mut ids = load_index(store).await?;

    if ids.contains(id) {
        debug!("Index already holds {}", id);
        return Ok(());
    }

    ids.push(id.clone());
    store.write(INDEX_KEY, &encode_index(&ids)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_missing_index_is_empty() {
        let store = MemoryStore::new();
        assert!(load_index(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = MemoryStore::new();
        let first = RecordId::new("1-aaaaaaa");
        let second = RecordId::new("2-bbbbbbb");

        append_index(&store, &first).await.unwrap();
        append_index(&store, &second).await.unwrap();

        assert_eq!(load_index(&store).await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_append_is_idempotent() {
        let store = MemoryStore::new();
        let id = RecordId::new("1-aaaaaaa");

        append_index(&store, &id).await.unwrap();
        append_index(&store, &id).await.unwrap();

        assert_eq!(load_index(&store).await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_garbage_index_reads_as_empty() {
        let store = MemoryStore::new();
        store.write(INDEX_KEY, b"{{{ not json").await.unwrap();

        assert!(load_index(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_after_garbage_starts_fresh() {
        let store = MemoryStore::new();
        store.write(INDEX_KEY, b"]").await.unwrap();

        let id = RecordId::new("1-aaaaaaa");
        append_index(&store, &id).await.unwrap();

        assert_eq!(load_index(&store).await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_index_read_failure_propagates() {
        let store = MemoryStore::new();
        store.poison_key(INDEX_KEY).await;

        assert!(load_index(&store).await.is_err());
    }
}
