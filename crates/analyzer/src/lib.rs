//! Signal Analyzer CLI internals
//!
//! Command implementations live in `commands`; the on-disk session token in
//! `session_file`.

pub mod commands;
pub mod session_file;
