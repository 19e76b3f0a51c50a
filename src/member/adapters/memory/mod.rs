//! In-memory membership adapters.

mod membership;

pub use membership::InMemoryMembershipRepository;
