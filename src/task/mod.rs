//! Task ordering and status management.
//!
//! Tasks are grouped into buckets by workspace and status and ranked inside
//! each bucket by a sparse numeric position. This module allocates ranks for
//! new tasks, projects tasks onto board columns, and applies batched
//! drag-and-drop reorders after checking that the batch stays inside one
//! workspace the caller belongs to. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
