use pgbind_core::stmt::Value;

/// What a [`Logger`] receives for every executed statement.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub query_text: &'a str,
    pub params: &'a [Value],

    /// Milliseconds between dispatch and completion, rounded.
    pub duration: u64,
}

/// Receives one [`LogRecord`] per successfully executed statement.
///
/// Failed statements are not logged; the error is returned to the caller
/// unchanged.
pub trait Logger: Send + Sync {
    fn log(&self, record: &LogRecord<'_>);
}

impl<F> Logger for F
where
    F: Fn(&LogRecord<'_>) + Send + Sync,
{
    fn log(&self, record: &LogRecord<'_>) {
        self(record)
    }
}

/// Emits each statement as a `tracing` event at debug level, with target
/// `pgbind::query`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        tracing::debug!(
            target: "pgbind::query",
            query_text = record.query_text,
            params = ?record.params,
            duration_ms = record.duration,
            "query executed"
        );
    }
}
