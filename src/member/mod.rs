//! Workspace membership for authorization checks.
//!
//! Tasks are only visible to and mutable by members of the owning workspace.
//! This module owns the member record and the directory port used by task
//! services to resolve a caller's membership.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
