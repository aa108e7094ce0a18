#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod codec;
pub mod contract;
pub mod index;
pub mod seal;
pub mod store;
pub mod sync;

pub use codec::{decode_index, decode_record, encode_index, encode_record, StoredRecord};
pub use contract::{LivenessRegistry, RegistryClient, RegistryConfig, ZERO_ADDRESS};
pub use index::{append_index, load_index};
pub use seal::{Sealer, SimulatedFhe};
pub use store::{MemoryStore, RegistryStore};
pub use sync::{RecordSynchronizer, RegistrySnapshot};
