//! Record synchronization over a [`RegistryStore`]. All reads go
//! through the id index; writes land the record value first and the
//! index entry second, so a torn submit leaves an orphaned record
//! rather than a dangling index entry.

use crate::codec::{decode_record, encode_record};
use crate::index::{append_index, load_index};
use crate::seal::{Sealer, SimulatedFhe};
use crate::store::RegistryStore;
use liveid_types::{
    LiveIdError, LiveIdResult, Record, RecordId, RecordStatus, StatusBreakdown, Verdict,
};
use tracing::{debug, info, warn};

pub struct RecordSynchronizer<S> {
    store: S,
    sealer: Box<dyn Sealer>,
}

impl<S: RegistryStore> RecordSynchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sealer: Box::new(SimulatedFhe::new()),
        }
    }

    pub fn with_sealer(store: S, sealer: Box<dyn Sealer>) -> Self {
        Self { store, sealer }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads every indexed record, newest first. Records that are
    /// missing, unreadable or corrupt are skipped so that one bad entry
    /// cannot hide the rest; only registry-level failures abort.
    pub async fn load_all(&self) -> LiveIdResult<Vec<Record>> {
        let available = self
            .store
            .is_available()
            .await
            .map_err(|e| LiveIdError::Unavailable(format!("Availability probe failed: {}", e)))?;

        if !available {
            return Err(LiveIdError::Unavailable(
                "Registry reports itself unavailable".into(),
            ));
        }

        let index = load_index(&self.store)
            .await
            .map_err(|e| LiveIdError::Unavailable(format!("Failed to read index: {}", e)))?;

        debug!("Index holds {} record ids", index.len());

        let mut records = Vec::with_capacity(index.len());
        for id in &index {
            let bytes = match self.store.read(&id.storage_key()).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Skipping unreadable record {}: {}", id, e);
                    continue;
                }
            };

            // Indexed but never written, or since cleared.
            if bytes.is_empty() {
                continue;
            }

            match decode_record(id, &bytes) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping corrupt record {}: {}", id, e),
            }
        }

        // Newest first; sort_by is stable, so equal timestamps keep
        // their index order.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!("Loaded {} of {} indexed records", records.len(), index.len());
        Ok(records)
    }

    /// Seals the payload and stores it as a new pending record owned by
    /// `owner`. The record write and the index append are two separate
    /// writes; if the second fails the record stays orphaned and
    /// invisible to `load_all`.
    pub async fn submit(&self, owner: &str, payload: &str) -> LiveIdResult<Record> {
        if payload.is_empty() {
            return Err(LiveIdError::Validation("Payload must not be empty".into()));
        }

        let record = Record {
            id: RecordId::generate(),
            encrypted_data: self.sealer.seal(payload)?,
            timestamp: chrono::Utc::now().timestamp(),
            owner: owner.to_string(),
            status: RecordStatus::Pending,
        };

        info!("Submitting record {} for {}", record.id, record.owner);

        let encoded = encode_record(&record)?;
        self.store
            .write(&record.id.storage_key(), &encoded)
            .await
            .map_err(|e| {
                LiveIdError::Submission(format!("Failed to write record {}: {}", record.id, e))
            })?;

        append_index(&self.store, &record.id).await.map_err(|e| {
            LiveIdError::Submission(format!("Failed to index record {}: {}", record.id, e))
        })?;

        Ok(record)
    }

    /// Applies a verdict to a pending record. The ownership check is
    /// advisory; the registry itself accepts writes from anyone holding
    /// a wallet. A record that already carries a verdict is never
    /// transitioned again.
    pub async fn transition(
        &self,
        id: &RecordId,
        caller: &str,
        verdict: Verdict,
    ) -> LiveIdResult<Record> {
        let bytes = self.store.read(&id.storage_key()).await?;
        if bytes.is_empty() {
            return Err(LiveIdError::NotFound(format!(
                "No record stored under {}",
                id
            )));
        }

        let mut record = decode_record(id, &bytes)?;

        if !record.is_owned_by(caller) {
            return Err(LiveIdError::Authorization(format!(
                "{} does not own record {}",
                caller, id
            )));
        }

        if record.status.is_terminal() {
            return Err(LiveIdError::InvalidState(format!(
                "Record {} is already {}",
                id, record.status
            )));
        }

        record.status = verdict.into();
        info!("Marking record {} as {}", id, record.status);

        let encoded = encode_record(&record)?;
        self.store
            .write(&id.storage_key(), &encoded)
            .await
            .map_err(|e| {
                LiveIdError::Submission(format!("Failed to update record {}: {}", id, e))
            })?;

        Ok(record)
    }

    /// Loads all records and stamps the result, for callers that render
    /// registry state and want to show how fresh it is.
    pub async fn snapshot(&self) -> LiveIdResult<RegistrySnapshot> {
        let records = self.load_all().await?;
        Ok(RegistrySnapshot {
            records,
            refreshed_at: chrono::Utc::now(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct RegistrySnapshot {
    pub records: Vec<Record>,
    pub refreshed_at: chrono::DateTime<chrono::Utc>,
}

impl RegistrySnapshot {
    pub fn breakdown(&self) -> StatusBreakdown {
        StatusBreakdown::tally(&self.records)
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn owned_by(&self, address: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.is_owned_by(address))
            .collect()
    }
}
