//! Port contracts for workspace membership.

pub mod repository;

pub use repository::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult};

#[cfg(test)]
pub use repository::MockMembershipRepository;
