//! Payload sealing. `SimulatedFhe` is a reversible placeholder that
//! only marks data as sealed; it offers no confidentiality and exists
//! so the rest of the pipeline is exercised against the final wire
//! shape until a real FHE backend replaces it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use liveid_types::{LiveIdError, LiveIdResult, SEALED_PREFIX};

pub trait Sealer: Send + Sync {
    fn seal(&self, plaintext: &str) -> LiveIdResult<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedFhe;

impl SimulatedFhe {
    pub fn new() -> Self {
        Self
    }

    /// Inverse of `seal`. Real FHE would not offer this; it exists so
    /// tests and local tooling can inspect what they stored.
    pub fn unseal(&self, sealed: &str) -> LiveIdResult<String> {
        let encoded = sealed
            .strip_prefix(SEALED_PREFIX)
            .ok_or_else(|| LiveIdError::Decode("Sealed payload missing prefix".into()))?;

        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| LiveIdError::Decode(format!("Invalid sealed payload: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| LiveIdError::Decode(format!("Sealed payload is not UTF-8: {}", e)))
    }
}

impl Sealer for SimulatedFhe {
    fn seal(&self, plaintext: &str) -> LiveIdResult<String> {
        Ok(format!("{}{}", SEALED_PREFIX, BASE64.encode(plaintext)))
    }
}
