//! Taskboard: task ordering and status model for Kanban project boards.
//!
//! Workspaces hold members and tasks. Each task sits in a status column and
//! carries a sparse rank that orders it within its (workspace, status)
//! bucket. This crate allocates those ranks, projects tasks onto board
//! columns, and applies batched reorders with workspace authorization.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Rank allocation, board projection and bulk reordering
//! - [`member`]: Workspace membership used for authorization
//! - [`config`]: Environment-driven service settings

pub mod config;
mod ids;
pub mod member;
pub mod task;
