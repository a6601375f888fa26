//! Pipewright Store - the configuration edit boundary
//!
//! This crate holds a working copy of a configuration document: three
//! insertion-ordered, name-keyed collections (externals, processes,
//! pipelines) plus partition metadata. Edits are whole-value: callers clone
//! an entity, modify the clone and commit it back. The store validates names
//! at creation time, loads and dumps whole documents through the codec, and
//! reports referential-integrity problems without rejecting them.

pub mod check;
pub mod error;
pub mod store;

pub use check::check_references;
pub use error::{Result, StoreError};
pub use store::ConfigStore;
