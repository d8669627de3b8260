use crate::{db::Table, log::LogRecord, Logger};

use pgbind_core::{
    async_trait,
    driver::{Queryable, Response, Row},
    stmt::Value,
    Result,
};
use pgbind_sql::{CompiledQuery, Query, Statement};
use std::time::Duration;
use tokio::time::Instant;

/// Issues one statement on `src`, timing the call and reporting it to `log`.
///
/// The clock is read immediately before dispatch and immediately after the
/// source resolves. On failure the source's error is returned unchanged and
/// nothing is logged.
pub async fn execute<Q>(
    src: &Q,
    query_text: &str,
    params: &[Value],
    log: Option<&dyn Logger>,
) -> Result<Response>
where
    Q: Queryable + ?Sized,
{
    let start = Instant::now();
    let response = src.query(query_text, params).await?;
    let duration = whole_millis(start.elapsed());

    if let Some(log) = log {
        log.log(&LogRecord {
            query_text,
            params,
            duration,
        });
    }

    Ok(response)
}

fn whole_millis(elapsed: Duration) -> u64 {
    ((elapsed.as_micros() + 500) / 1000) as u64
}

/// Statement execution shared by [`Db`](crate::Db) and
/// [`Transaction`](crate::Transaction).
#[async_trait]
pub trait Executor: Send + Sync {
    /// Issues `query_text` with `params` bound to `$1..$n`.
    async fn execute(&self, query_text: &str, params: &[Value]) -> Result<Response>;

    async fn execute_compiled(&self, query: &CompiledQuery) -> Result<Response> {
        self.execute(&query.query_text, &query.params).await
    }

    /// Compiles `query` and returns the rows it selects.
    async fn execute_query(&self, query: &Query) -> Result<Vec<Row>> {
        let compiled = query.compile();
        Ok(self.execute_compiled(&compiled).await?.into_rows())
    }

    /// Counts the rows `query` matches, ignoring its sorting and paging.
    async fn count(&self, query: &Query) -> Result<i64> {
        let compiled = Statement::count(query.clone()).compile();
        let response = self.execute_compiled(&compiled).await?;

        match response.into_first_row().and_then(|mut row| row.take("count")) {
            Some(count) => count.to_i64(),
            None => Ok(0),
        }
    }

    /// CRUD helpers for `table`.
    fn table(&self, table: impl Into<String>) -> Table<'_>
    where
        Self: Sized,
    {
        Table::new(self, table)
    }
}
