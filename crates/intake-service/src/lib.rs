//! Request orchestrator for agency search requests.
//!
//! [`AgencyRequestService`] turns a parsed [`SearchRequestOrdered`] into a
//! sequence of calls against a [`SearchRequestStore`]: create, cancel, or
//! merge an update into what is already stored. Calls run one after another
//! with a single [`CancelSignal`] threaded through each of them.
//!
//! [`SearchRequestOrdered`]: intake_core::wire::SearchRequestOrdered
//! [`SearchRequestStore`]: intake_core::store::SearchRequestStore
//! [`CancelSignal`]: intake_core::cancel::CancelSignal

mod cascade;
mod error;
mod service;
mod update;


pub use error::{Error, Result};
pub use service::AgencyRequestService;
