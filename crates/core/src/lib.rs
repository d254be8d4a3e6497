//! Domain primitives shared by the store and the HTTP layer.
//!
//! This crate does no I/O. It defines the record identity type, the
//! [`record::Record`] trait implemented by every persisted resource, and the
//! pure in-memory operations (lookup, id allocation, insert, replace, remove)
//! that every storage backend builds on.

pub mod error;
pub mod record;
pub mod types;
