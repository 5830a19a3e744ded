//! Reaction service interface.

use std::sync::Arc;

use async_trait::async_trait;

use crate::reaction::{List, QueryOptions, Reaction};

/// Result type for reaction service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur during reaction service operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Reaction not found: namespace={namespace}, id={id}")]
    NotFound { namespace: String, id: u64 },

    #[error("Reaction conflict: namespace={namespace}, object={object_id}, owner={owner_id}")]
    Conflict {
        namespace: String,
        object_id: u64,
        owner_id: u64,
    },

    #[error("Namespace not set up: {0}")]
    InvalidNamespace(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Interface for namespace-scoped reaction persistence.
///
/// Implementations:
/// - `MockReactionStore`: in-memory storage
/// - `Logged`: logging advice around any other implementation
#[async_trait]
pub trait ReactionService: Send + Sync {
    /// Count reactions matching `opts`.
    async fn count(&self, namespace: &str, opts: &QueryOptions) -> Result<u64>;

    /// Create or update a reaction.
    ///
    /// The returned reaction carries store-assigned fields.
    async fn put(&self, namespace: &str, input: Reaction) -> Result<Reaction>;

    /// Retrieve reactions matching `opts`.
    async fn query(&self, namespace: &str, opts: &QueryOptions) -> Result<List>;

    /// Prepare backing storage for a namespace.
    async fn setup(&self, namespace: &str) -> Result<()>;

    /// Remove backing storage for a namespace.
    async fn teardown(&self, namespace: &str) -> Result<()>;
}

#[async_trait]
impl<S: ReactionService + ?Sized> ReactionService for Arc<S> {
    async fn count(&self, namespace: &str, opts: &QueryOptions) -> Result<u64> {
        (**self).count(namespace, opts).await
    }

    async fn put(&self, namespace: &str, input: Reaction) -> Result<Reaction> {
        (**self).put(namespace, input).await
    }

    async fn query(&self, namespace: &str, opts: &QueryOptions) -> Result<List> {
        (**self).query(namespace, opts).await
    }

    async fn setup(&self, namespace: &str) -> Result<()> {
        (**self).setup(namespace).await
    }

    async fn teardown(&self, namespace: &str) -> Result<()> {
        (**self).teardown(namespace).await
    }
}

/// Type-erased wrapper that decorates one service with another.
pub type ServiceMiddleware =
    Box<dyn Fn(Arc<dyn ReactionService>) -> Arc<dyn ReactionService> + Send + Sync>;

/// Apply `middlewares` around `service`.
///
/// The first middleware ends up outermost, so it sees each call first.
pub fn chain(
    service: Arc<dyn ReactionService>,
    middlewares: Vec<ServiceMiddleware>,
) -> Arc<dyn ReactionService> {
    middlewares
        .into_iter()
        .rev()
        .fold(service, |next, middleware| middleware(next))
}
