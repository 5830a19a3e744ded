//! Abstract interfaces for reaction components.
//!
//! These traits define the contracts for:
//! - Reaction persistence (namespace-scoped store)
//! - Middleware composition around a store

pub mod reaction_service;

pub use reaction_service::{chain, ReactionService, Result, ServiceError, ServiceMiddleware};
