//! Shared fakes for unit tests: scriptable instances whose leadership state
//! the test flips, and a factory that counts shutdown invocations.
mod fake_instance;

pub use fake_instance::*;
