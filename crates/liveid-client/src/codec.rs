//! JSON wire format for registry entries. A record value carries
//! `data`, `timestamp`, `owner` and `status`; the record id is not part
//! of the value, it rides in the storage key. The index value is a bare
//! JSON array of id strings.

use liveid_types::{LiveIdError, LiveIdResult, Record, RecordId, RecordStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredRecord {
    pub data: String,
    pub timestamp: i64,
    pub owner: String,
    #[serde(default)]
    pub status: RecordStatus,
}

pub fn encode_record(record: &Record) -> LiveIdResult<Vec<u8>> {
    let stored = StoredRecord {
        data: record.encrypted_data.clone(),
        timestamp: record.timestamp,
        owner: record.owner.clone(),
        status: record.status,
    };
    serde_json::to_vec(&stored)
        .map_err(|e| LiveIdError::Serialization(format!("Failed to encode record: {}", e)))
}

pub fn decode_record(id: &RecordId, bytes: &[u8]) -> LiveIdResult<Record> {
    if bytes.is_empty() {
        return Err(LiveIdError::Decode(format!("Empty entry for record {}", id)));
    }

    let stored: StoredRecord = serde_json::from_slice(bytes)
        .map_err(|e| LiveIdError::Decode(format!("Malformed record {}: {}", id, e)))?;

    Ok(Record {
        id: id.clone(),
        encrypted_data: stored.data,
        timestamp: stored.timestamp,
        owner: stored.owner,
        status: stored.status,
    })
}

pub fn encode_index(ids: &[RecordId]) -> LiveIdResult<Vec<u8>> {
    serde_json::to_vec(ids)
        .map_err(|e| LiveIdError::Serialization(format!("Failed to encode index: {}", e)))
}

pub fn decode_index(bytes: &[u8]) -> LiveIdResult<Vec<RecordId>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes)
        .map_err(|e| LiveIdError::Decode(format!("Malformed index: {}", e)))
}
