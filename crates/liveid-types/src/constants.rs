pub const INDEX_KEY: &str = "identity_keys";

pub const RECORD_KEY_PREFIX: &str = "identity_";

pub const RECORD_ID_SUFFIX_LEN: usize = 7;

pub const SEALED_PREFIX: &str = "FHE-";
