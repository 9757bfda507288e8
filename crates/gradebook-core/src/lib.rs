//! gradebook-core — Student records, the roster store, and its flat-file format.
//!
//! This crate owns everything with invariants: the student model and GPA
//! computation, CRUD over the roster, and loading and saving the roster file.
//! Console interaction lives in `gradebook-cli`.

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod roster;
pub mod statistics;
pub mod storage;
pub mod traits;
