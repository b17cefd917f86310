//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user directory guarded by a mutex.
//!
//! Adapters are thin translators between domain types and their storage.
//! They contain no business logic.

pub mod memory;
