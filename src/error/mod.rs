//! Error diagnostics and fatal-error handling.
//!
//! This module provides:
//! - Root-cause extraction over wrapped errors ([`root_cause`], [`describe`], [`chain`])
//! - An error type recording where it was created ([`Traced`], [`WrapErr`])
//! - Named exit strategies and the handler applying them ([`ExitStrategy`], [`ExitHandler`])
//!
//! Outer errors usually carry the human context ("failed to do X") while the
//! root carries the mechanical origin. Both are reported, separately.

mod chain;
mod exit;
mod traced;

#[cfg(test)]
mod exit_tests;

pub use chain::{Chain, Description, MAX_CHAIN_DEPTH, chain, describe, root_cause};
pub use exit::{Cleanup, ExitError, ExitHandler, ExitStrategy, FatalReport};
pub use traced::{Traced, WrapErr};
