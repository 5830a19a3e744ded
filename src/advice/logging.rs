//! Structured logging advice.
//!
//! Wraps a [`ReactionService`] so that every call emits exactly one
//! key-value record to a [`LogSink`] once the wrapped call has finished.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::config::{Config, SinkType};
use crate::interfaces::{ReactionService, Result, ServiceMiddleware};
use crate::reaction::{List, QueryOptions, Reaction};
use crate::sink::{Context, LogRecord, LogSink, LogValue, TracingSink, WriterSink};

/// Value bound to the `service` field of every record.
pub const SERVICE_NAME: &str = "reaction";

/// Factory that wraps reaction services with logging.
///
/// Binds `service` and `store` into the sink once; every service it wraps
/// shares that bound sink.
///
/// # Example
///
/// ```ignore
/// let middleware = LogServiceMiddleware::new(TracingSink::new(), "postgres");
/// let store = middleware.wrap(PostgresReactionStore::new(pool));
///
/// // Use as normal - logging is transparent
/// store.put("acme", reaction).await?;
/// ```
#[derive(Clone)]
pub struct LogServiceMiddleware {
    sink: Arc<dyn LogSink>,
}

impl LogServiceMiddleware {
    /// Configure logging for services backed by `store`.
    ///
    /// # Arguments
    /// * `sink` - Destination for log records
    /// * `store` - Store identifier bound as the `store` field (e.g., "mongo")
    pub fn new(sink: impl LogSink + 'static, store: impl Into<String>) -> Self {
        let sink = Context::new(sink)
            .with("service", SERVICE_NAME)
            .with("store", store.into());
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Build the middleware described by `config`.
    pub fn from_config(config: &Config) -> Self {
        match config.logging.sink {
            SinkType::Tracing => Self::new(TracingSink::new(), config.store.name.clone()),
            SinkType::Stdout => Self::new(WriterSink::stdout(), config.store.name.clone()),
        }
    }

    /// Wrap `next` with logging.
    pub fn wrap<S: ReactionService>(&self, next: S) -> Logged<S> {
        Logged {
            next,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Type-erased form for composing with other middleware.
    pub fn into_middleware(self) -> ServiceMiddleware {
        Box::new(move |next: Arc<dyn ReactionService>| {
            Arc::new(self.wrap(next)) as Arc<dyn ReactionService>
        })
    }
}

/// Reaction service wrapper that logs every call.
///
/// Results and errors from the inner service pass through unchanged.
/// Sink failures are discarded.
pub struct Logged<S> {
    next: S,
    sink: Arc<dyn LogSink>,
}

impl<S> Logged<S> {
    /// Get a reference to the inner service.
    pub fn inner(&self) -> &S {
        &self.next
    }

    /// Consume the wrapper and return the inner service.
    pub fn into_inner(self) -> S {
        self.next
    }
}

/// Per-operation inputs captured for the record.
enum Call<'a> {
    Count { opts: &'a QueryOptions },
    Put { input: LogValue },
    Query { opts: &'a QueryOptions },
    Setup,
    Teardown,
}

impl Call<'_> {
    fn method(&self) -> &'static str {
        match self {
            Call::Count { .. } => "Count",
            Call::Put { .. } => "Put",
            Call::Query { .. } => "Query",
            Call::Setup => "Setup",
            Call::Teardown => "Teardown",
        }
    }

    /// Output recorded when the call never produced one.
    fn zero_output(&self) -> LogValue {
        match self {
            Call::Count { .. } | Call::Query { .. } => LogValue::Uint(0),
            Call::Put { .. } | Call::Setup | Call::Teardown => LogValue::Nil,
        }
    }
}

/// Scoped guard that emits one record when dropped.
///
/// Dropping covers normal return, unwinding out of the inner service and
/// the caller abandoning the future before completion.
struct CallLog<'a> {
    sink: &'a dyn LogSink,
    begin: Instant,
    namespace: &'a str,
    call: Call<'a>,
    output: LogValue,
    err: Option<String>,
}

impl<'a> CallLog<'a> {
    fn begin(sink: &'a dyn LogSink, namespace: &'a str, call: Call<'a>) -> Self {
        let output = call.zero_output();
        Self {
            sink,
            begin: Instant::now(),
            namespace,
            call,
            output,
            err: None,
        }
    }

    fn finish<T>(&mut self, result: &Result<T>, output: impl FnOnce(&T) -> LogValue) {
        match result {
            Ok(value) => self.output = output(value),
            Err(e) => self.err = Some(e.to_string()),
        }
    }

    fn record(&mut self) -> LogRecord {
        let duration_ns = u64::try_from(self.begin.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let output = std::mem::replace(&mut self.output, LogValue::Nil);
        let method = self.call.method();

        let mut record = LogRecord::with_capacity(7);
        match &mut self.call {
            Call::Count { opts } => {
                record.push("count", output);
                record.push("duration_ns", duration_ns);
                record.push("method", method);
                record.push("namespace", self.namespace);
                record.push("opts", LogValue::json(*opts));
            }
            Call::Put { input } => {
                record.push("duration_ns", duration_ns);
                record.push("method", method);
                record.push("namespace", self.namespace);
                record.push("reaction_input", std::mem::replace(input, LogValue::Nil));
                record.push("reaction_output", output);
            }
            Call::Query { opts } => {
                record.push("duration_ns", duration_ns);
                record.push("method", method);
                record.push("namespace", self.namespace);
                record.push("reaction_len", output);
                record.push("opts", LogValue::json(*opts));
            }
            Call::Setup | Call::Teardown => {
                record.push("duration_ns", duration_ns);
                record.push("method", method);
                record.push("namespace", self.namespace);
            }
        }

        if let Some(err) = self.err.take() {
            record.push("err", err);
        }

        record
    }
}

impl Drop for CallLog<'_> {
    fn drop(&mut self) {
        let record = self.record();
        let _ = self.sink.log(&record);
    }
}

#[async_trait]
impl<S: ReactionService> ReactionService for Logged<S> {
    async fn count(&self, namespace: &str, opts: &QueryOptions) -> Result<u64> {
        let mut call = CallLog::begin(&*self.sink, namespace, Call::Count { opts });

        let result = self.next.count(namespace, opts).await;

        call.finish(&result, |count| LogValue::Uint(*count));
        result
    }

    async fn put(&self, namespace: &str, input: Reaction) -> Result<Reaction> {
        let captured = LogValue::json(&input);
        let mut call = CallLog::begin(&*self.sink, namespace, Call::Put { input: captured });

        let result = self.next.put(namespace, input).await;

        call.finish(&result, |output| LogValue::json(output));
        result
    }

    async fn query(&self, namespace: &str, opts: &QueryOptions) -> Result<List> {
        let mut call = CallLog::begin(&*self.sink, namespace, Call::Query { opts });

        let result = self.next.query(namespace, opts).await;

        call.finish(&result, |list| LogValue::from(list.len()));
        result
    }

    async fn setup(&self, namespace: &str) -> Result<()> {
        let mut call = CallLog::begin(&*self.sink, namespace, Call::Setup);

        let result = self.next.setup(namespace).await;

        call.finish(&result, |_| LogValue::Nil);
        result
    }

    async fn teardown(&self, namespace: &str) -> Result<()> {
        let mut call = CallLog::begin(&*self.sink, namespace, Call::Teardown);

        let result = self.next.teardown(namespace).await;

        call.finish(&result, |_| LogValue::Nil);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::ServiceError;
    use crate::sink::MemorySink;
    use crate::storage::MockReactionStore;

    fn logged() -> (Logged<MockReactionStore>, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::new());
        let middleware = LogServiceMiddleware::new(memory.clone(), "mongo");
        (middleware.wrap(MockReactionStore::new()), memory)
    }

    #[tokio::test]
    async fn test_logged_delegates_to_inner() {
        let (store, memory) = logged();

        store.setup("acme").await.unwrap();
        let count = store.count("acme", &QueryOptions::default()).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(memory.len(), 2);
    }

    #[tokio::test]
    async fn test_logged_preserves_errors() {
        let (store, memory) = logged();

        let result = store.query("missing", &QueryOptions::default()).await;
        assert_eq!(
            result.unwrap_err(),
            ServiceError::InvalidNamespace("missing".to_string())
        );

        let records = memory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("err").and_then(LogValue::as_str),
            Some("Namespace not set up: missing")
        );
    }

    #[tokio::test]
    async fn test_record_binds_service_and_store_first() {
        let (store, memory) = logged();

        store.setup("acme").await.unwrap();

        let records = memory.records();
        let keys: Vec<_> = records[0].keys().collect();
        assert_eq!(
            keys,
            vec!["service", "store", "duration_ns", "method", "namespace"]
        );
        assert_eq!(
            records[0].get("service").and_then(LogValue::as_str),
            Some("reaction")
        );
        assert_eq!(
            records[0].get("store").and_then(LogValue::as_str),
            Some("mongo")
        );
    }

    #[tokio::test]
    async fn test_one_middleware_wraps_many_services() {
        let memory = Arc::new(MemorySink::new());
        let middleware = LogServiceMiddleware::new(memory.clone(), "memory");
        let first = middleware.wrap(MockReactionStore::new());
        let second = middleware.wrap(MockReactionStore::new());

        first.setup("a").await.unwrap();
        second.setup("b").await.unwrap();

        let namespaces: Vec<_> = memory
            .records()
            .iter()
            .map(|r| r.get("namespace").and_then(LogValue::as_str).map(str::to_string))
            .collect();
        assert_eq!(
            namespaces,
            vec![Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn test_into_inner_returns_wrapped_service() {
        let (store, _memory) = logged();
        store.setup("acme").await.unwrap();

        let inner = store.into_inner();
        assert_eq!(inner.calls().await, vec!["setup:acme".to_string()]);
    }
}
