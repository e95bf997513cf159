//! Ensemble lifecycle and leader discovery.
//!
//! [`Ensemble`] owns a set of independently-running timestamp service
//! instances sharing one election backend. Lifecycle operations mutate the
//! instance registry one entry at a time; discovery operations poll the
//! current registry snapshot for externally-reported leadership state.

mod discovery;
mod ensemble;
mod registry;

pub use ensemble::*;
