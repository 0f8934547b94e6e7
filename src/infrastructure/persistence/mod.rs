//! Store implementations.
//!
//! - [`PgLinkStore`] - PostgreSQL store; the slug primary key is the
//!   uniqueness arbiter for concurrent allocations
//! - [`MemoryLinkStore`] - in-memory store for tests and database-free
//!   development

pub mod memory_link_store;
pub mod pg_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
