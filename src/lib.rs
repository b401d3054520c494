//! Gatepost - the authentication and authorization core of a blogging
//! backend
//!
//! This library proves credentials against a stored identity, issues and
//! verifies signed bearer tokens, and decides access for protected
//! operations from role membership and resource ownership. Persistence
//! and HTTP transport are external collaborators.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod storage;

// Re-export main components
pub use config::AuthConfig;
pub use constants::*;
pub use error::{GatepostError, Result};
