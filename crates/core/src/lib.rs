//! Domain types and storage contracts for the M-Hike trip log.
//!
//! This crate has no I/O. The `mhike` crate provides the storage backends.

pub mod hike;
pub mod serde;
pub mod storage;
