mod builder;
pub use builder::Builder;

mod table;
pub use table::Table;

use crate::{exec, Executor, Logger, TransactionBuilder};

use pgbind_core::{
    async_trait,
    driver::{Driver, Response},
    stmt::Value,
    Result,
};

use std::sync::Arc;

/// A handle to a pooled database.
///
/// Statements issued on the handle run on whichever pooled connection is
/// free. Use [`Db::transaction`] to run several statements on one dedicated
/// connection. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct Db {
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) log: Option<Arc<dyn Logger>>,
}

impl Db {
    /// Wraps `driver` without a logger.
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self {
            driver: Arc::new(driver),
            log: None,
        }
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects to the PostgreSQL database at `url` with default pool
    /// settings and no logger.
    #[cfg(feature = "postgresql")]
    pub async fn connect(url: &str) -> Result<Self> {
        Builder::default().connect(url).await
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn logger(&self) -> Option<&dyn Logger> {
        self.log.as_deref()
    }

    /// Runs `unit_of_work` inside `BEGIN` .. `COMMIT` on a dedicated
    /// connection and returns its output.
    ///
    /// If beginning, the unit of work or committing fails, the transaction
    /// is rolled back and the original error is returned. The connection is
    /// released exactly once in every case.
    pub async fn transaction<O>(
        &self,
        unit_of_work: impl AsyncFnOnce(&crate::Transaction<'_>) -> Result<O>,
    ) -> Result<O> {
        self.transaction_builder().run(unit_of_work).await
    }

    /// Configures isolation level or read-only mode before running a
    /// transaction.
    pub fn transaction_builder(&self) -> TransactionBuilder<'_> {
        TransactionBuilder::new(self)
    }
}

#[async_trait]
impl Executor for Db {
    async fn execute(&self, query_text: &str, params: &[Value]) -> Result<Response> {
        exec::execute(&*self.driver, query_text, params, self.logger()).await
    }
}

impl core::fmt::Debug for Db {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.driver)
            .field("log", &self.log.is_some())
            .finish()
    }
}
