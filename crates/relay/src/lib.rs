//! Relay - Remote Scan Registry
//!
//! Mediates between the locally held saved-scan list and the remote scan
//! authority: token-scoped refresh, save with authority-assigned ids, and
//! optimistic removal with exact rollback. The HTTP client in `client`
//! implements every boundary trait against the authority's REST API.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;
