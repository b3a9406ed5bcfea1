//! Pattern collection and its persistence collaborator

/// Pattern collection with generated, sandbox and saved entries
pub mod collection;
/// Storage trait with in-memory and JSON directory backends
pub mod storage;

pub use collection::{Pattern, PatternStore, SANDBOX_ID, SAVED_PREFIX};
pub use storage::{JsonDirStorage, MemoryStorage, PatternRecord, Storage};
