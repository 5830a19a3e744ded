//! Aspect-oriented advice for cross-cutting concerns.
//!
//! This module provides wrapper types that add orthogonal behavior
//! without polluting store implementations.
//!
//! # Architecture
//!
//! Advice is applied at service composition time, not in implementations:
//!
//! ```ignore
//! // Core implementation - pure storage logic
//! let store = MockReactionStore::new();
//!
//! // Apply advice layers
//! let store = LogServiceMiddleware::new(TracingSink::new(), "memory").wrap(store);
//!
//! // Use as normal - logging is transparent
//! store.setup("acme").await?;
//! ```
//!
//! # Available Advice
//!
//! - [`Logged`] - Emits one structured record per call

mod logging;

pub use logging::{LogServiceMiddleware, Logged, SERVICE_NAME};
