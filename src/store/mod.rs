//! Durable, crash-safe storage for the three league tables
//!
//! The store is the single source of truth for player records, pending
//! matches, and confirmed history. Writes use atomic replace with a backup
//! snapshot; mutating callers serialize whole load-modify-save cycles behind
//! a cross-process advisory lock.

pub mod file;
pub mod lock;
pub mod snapshot;

// Re-export commonly used types
pub use file::FileStore;
pub use lock::StoreLock;
pub use snapshot::TableSnapshot;
