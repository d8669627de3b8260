use crate::{exec, Db, Executor, Logger};

use pgbind_core::{
    async_trait,
    driver::{Connection, Response},
    stmt::Value,
    Result,
};

use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    pub fn sql_name(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

/// Builder for configuring a transaction before running it.
#[derive(Debug)]
pub struct TransactionBuilder<'db> {
    db: &'db Db,
    isolation: Option<IsolationLevel>,
    read_only: bool,
}

impl<'db> TransactionBuilder<'db> {
    pub(crate) fn new(db: &'db Db) -> Self {
        TransactionBuilder {
            db,
            isolation: None,
            read_only: false,
        }
    }

    /// Set the isolation level for this transaction.
    pub fn isolation(mut self, level: IsolationLevel) -> Self {
        self.isolation = Some(level);
        self
    }

    /// Set whether this transaction is read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// The statement that opens the transaction.
    pub fn begin_statement(&self) -> String {
        let mut sql = String::from("BEGIN");
        if let Some(level) = self.isolation {
            sql.push_str(" ISOLATION LEVEL ");
            sql.push_str(level.sql_name());
        }
        if self.read_only {
            sql.push_str(" READ ONLY");
        }
        sql
    }

    /// Runs `unit_of_work` between `BEGIN` and `COMMIT` on a dedicated
    /// connection, rolling back on any failure.
    pub async fn run<O>(
        self,
        unit_of_work: impl AsyncFnOnce(&Transaction<'_>) -> Result<O>,
    ) -> Result<O> {
        let connection = Checkout(Some(self.db.driver.connect().await?));

        let tx = Transaction {
            connection: &*connection,
            log: self.db.logger(),
        };

        let begin = self.begin_statement();
        let res = async {
            tx.control(&begin).await?;
            let output = unit_of_work(&tx).await?;
            tx.control("COMMIT").await?;
            Ok::<_, pgbind_core::Error>(output)
        }
        .await;

        match res {
            Ok(output) => Ok(output),
            Err(err) => match tx.control("ROLLBACK").await {
                Ok(()) => Err(err),
                Err(rollback) => {
                    tracing::error!(error = %err, rollback_error = %rollback, "rollback failed");
                    Err(err.rollback_failed(rollback))
                }
            },
        }
        // `connection` drops here, returning it to the pool
    }
}

/// The handle a unit of work receives. Every statement issued through it
/// runs on the transaction's connection and is logged like any other.
pub struct Transaction<'a> {
    connection: &'a dyn Connection,
    log: Option<&'a dyn Logger>,
}

impl Transaction<'_> {
    /// Issues a transaction control statement without logging it.
    async fn control(&self, sql: &str) -> Result<()> {
        tracing::debug!(statement = sql, "transaction control");
        self.connection.query(sql, &[]).await?;
        Ok(())
    }
}

#[async_trait]
impl Executor for Transaction<'_> {
    async fn execute(&self, query_text: &str, params: &[Value]) -> Result<Response> {
        exec::execute(self.connection, query_text, params, self.log).await
    }
}

impl core::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Transaction")
            .field("connection", &self.connection)
            .finish()
    }
}

/// Releases a checked-out connection on every exit path.
struct Checkout(Option<Box<dyn Connection>>);

impl Deref for Checkout {
    type Target = dyn Connection;

    fn deref(&self) -> &Self::Target {
        match &self.0 {
            Some(connection) => &**connection,
            None => unreachable!("connection already released"),
        }
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if let Some(connection) = self.0.take() {
            connection.release();
        }
    }
}
