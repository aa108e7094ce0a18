use crate::constants::{RECORD_ID_SUFFIX_LEN, RECORD_KEY_PREFIX};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..RECORD_ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}-{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", RECORD_KEY_PREFIX, self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Verified => "verified",
            RecordStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecordStatus::Pending)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Verified,
    Rejected,
}

impl From<Verdict> for RecordStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Verified => RecordStatus::Verified,
            Verdict::Rejected => RecordStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub encrypted_data: String,
    pub timestamp: i64,
    pub owner: String,
    pub status: RecordStatus,
}

impl Record {
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.owner.eq_ignore_ascii_case(address)
    }

    pub fn is_pending(&self) -> bool {
        self.status == RecordStatus::Pending
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub total: usize,
    pub pending: usize,
    pub verified: usize,
    pub rejected: usize,
}

impl StatusBreakdown {
    pub fn tally(records: &[Record]) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            breakdown.total += 1;
            match record.status {
                RecordStatus::Pending => breakdown.pending += 1,
                RecordStatus::Verified => breakdown.verified += 1,
                RecordStatus::Rejected => breakdown.rejected += 1,
            }
        }
        breakdown
    }

    pub fn count(&self, status: RecordStatus) -> usize {
        match status {
            RecordStatus::Pending => self.pending,
            RecordStatus::Verified => self.verified,
            RecordStatus::Rejected => self.rejected,
        }
    }

    pub fn share(&self, status: RecordStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64
    }
}
