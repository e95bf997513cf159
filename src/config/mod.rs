//! Configuration for harness-managed instances.
//!
//! Loading follows the usual source priority:
//! 1. Hardcoded field defaults
//! 2. Optional config file
//! 3. Environment variables (highest priority)
//!
//! Ensemble lifecycle code never loads from file: it clones the cluster-wide
//! settings into a per-instance [`InstanceConfig`] and resolves it. File and
//! environment loading exists for drivers that configure the harness itself.

mod instance;
mod poll;
pub use instance::*;
pub use poll::*;

#[cfg(test)]
mod config_test;
