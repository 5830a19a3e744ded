//! Reaction - namespace-scoped reaction store contract
//!
//! Defines the reaction service interface and transparent advice
//! (structured call logging) that wraps any implementation of it.

pub mod advice;
pub mod config;
pub mod interfaces;
pub mod reaction;
pub mod sink;
pub mod storage;
pub mod utils;

pub use advice::{LogServiceMiddleware, Logged};
pub use interfaces::{ReactionService, ServiceError};
pub use reaction::{List, QueryOptions, Reaction, ReactionType};
