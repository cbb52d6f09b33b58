//! Repository layer for database operations.
//!
//! Repositories encapsulate the SeaORM queries so entities stay plain data and
//! the storage layer only deals in namespaces and decoded values.

pub mod kv;

pub use kv::KvRepository;
