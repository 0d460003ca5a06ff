//! Flockloop command-line client.
//!
//! Wires the reqwest transport, the file-backed session and the
//! authenticated API client together and exposes them as subcommands.

pub mod cli;
pub mod commands;
pub mod context;
