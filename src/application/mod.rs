//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating store and cache
//! calls, validation, and business rules. Services consume the store and
//! cache traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Slug allocation and availability
//! - [`services::resolution_service::ResolutionService`] - Slug resolution and click dispatch

pub mod services;
