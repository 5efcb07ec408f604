//! Key-value persistence port.
//!
//! Session state (profile, drafts, survey history) is a convenience, not a
//! correctness requirement: callers that want the degrade-to-defaults
//! behavior go through [`crate::session::SessionStore`], which swallows
//! these errors. The port itself stays honest and reports them.

/// Storage abstraction so session state can be mirrored anywhere a string
/// map fits (browser-local storage, a file, a test double).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored value for '{key}' is not valid JSON")]
    Corrupt { key: String },
}
