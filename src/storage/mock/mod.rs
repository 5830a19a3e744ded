//! Mock storage implementations for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::interfaces::{ReactionService, Result, ServiceError};
use crate::reaction::{List, QueryOptions, Reaction};


/// Mock reaction store that keeps namespaces in memory.
///
/// Namespaces must be set up before use. Failures and latency can be
/// injected per method, and every call is recorded as `"<method>:<namespace>"`.
#[derive(Default)]
pub struct MockReactionStore {
    namespaces: RwLock<HashMap<String, Vec<Reaction>>>,
    next_id: AtomicU64,
    failures: RwLock<HashMap<&'static str, ServiceError>>,
    delay: RwLock<Option<Duration>>,
    calls: RwLock<Vec<String>>,
}

impl MockReactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `method` ("count", "put", "query", "setup",
    /// "teardown") fail with `error` until cleared.
    pub async fn fail_on(&self, method: &'static str, error: ServiceError) {
        self.failures.write().await.insert(method, error);
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Sleep for `delay` at the start of every call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn stored_count(&self, namespace: &str) -> usize {
        self.namespaces
            .read()
            .await
            .get(namespace)
            .map_or(0, Vec::len)
    }

    async fn enter(&self, method: &'static str, namespace: &str) -> Result<()> {
        self.calls.write().await.push(format!("{method}:{namespace}"));

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.failures.read().await.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Reactions passing every filter in `opts`, newest first, unpaged.
    async fn filtered(&self, namespace: &str, opts: &QueryOptions) -> Result<List> {
        let store = self.namespaces.read().await;
        let reactions = store
            .get(namespace)
            .ok_or_else(|| ServiceError::InvalidNamespace(namespace.to_string()))?;

        let mut list: List = reactions
            .iter()
            .filter(|r| opts.matches(r))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }
}

#[async_trait]
impl ReactionService for MockReactionStore {
    async fn count(&self, namespace: &str, opts: &QueryOptions) -> Result<u64> {
        self.enter("count", namespace).await?;
        let list = self.filtered(namespace, opts).await?;
        Ok(list.len() as u64)
    }

    async fn put(&self, namespace: &str, input: Reaction) -> Result<Reaction> {
        self.enter("put", namespace).await?;

        let mut store = self.namespaces.write().await;
        let reactions = store
            .get_mut(namespace)
            .ok_or_else(|| ServiceError::InvalidNamespace(namespace.to_string()))?;
        let now = Utc::now();

        if input.id != 0 {
            let existing = reactions
                .iter_mut()
                .find(|r| r.id == input.id)
                .ok_or_else(|| ServiceError::NotFound {
                    namespace: namespace.to_string(),
                    id: input.id,
                })?;
            existing.object_id = input.object_id;
            existing.owner_id = input.owner_id;
            existing.reaction_type = input.reaction_type;
            existing.deleted = input.deleted;
            existing.updated_at = Some(now);
            return Ok(existing.clone());
        }

        let duplicate = reactions.iter().any(|r| {
            !r.deleted
                && r.object_id == input.object_id
                && r.owner_id == input.owner_id
                && r.reaction_type == input.reaction_type
        });
        if duplicate {
            return Err(ServiceError::Conflict {
                namespace: namespace.to_string(),
                object_id: input.object_id,
                owner_id: input.owner_id,
            });
        }

        let output = Reaction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            created_at: Some(now),
            updated_at: Some(now),
            ..input
        };
        reactions.push(output.clone());
        Ok(output)
    }

    async fn query(&self, namespace: &str, opts: &QueryOptions) -> Result<List> {
        self.enter("query", namespace).await?;
        let mut list = self.filtered(namespace, opts).await?;
        if opts.limit > 0 {
            list.truncate(opts.limit);
        }
        Ok(list)
    }

    async fn setup(&self, namespace: &str) -> Result<()> {
        self.enter("setup", namespace).await?;
        self.namespaces
            .write()
            .await
            .entry(namespace.to_string())
            .or_default();
        Ok(())
    }

    async fn teardown(&self, namespace: &str) -> Result<()> {
        self.enter("teardown", namespace).await?;
        self.namespaces.write().await.remove(namespace);
        Ok(())
    }
}
