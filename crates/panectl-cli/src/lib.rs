//! panectl CLI library.
//!
//! Argument parsing and the action runner behind the `panectl` binary.

pub mod cli;
pub mod commands;
