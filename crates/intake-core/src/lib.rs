//! Core types and trait definitions for agency request intake.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! holds the wire schema, the storage schema, the merge primitive and the
//! storage collaborator trait that every other crate builds on.

pub mod cancel;
pub mod codes;
pub mod entity;
pub mod error;
pub mod merge;
pub mod store;
pub mod wire;

pub use error::{Error, Result};
