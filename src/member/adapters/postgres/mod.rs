//! `PostgreSQL` adapters for membership persistence.

mod models;
mod repository;
mod schema;

pub use repository::{MemberPgPool, PostgresMembershipRepository};
