//! Parameter-safe execution of compiled queries against a pooled connection.
//!
//! ```ignore
//! use pgbind::{Db, Executor, Query, TracingLogger};
//!
//! let db = Db::builder()
//!     .log(TracingLogger)
//!     .connect("postgresql://localhost/app")
//!     .await?;
//!
//! let users = db
//!     .execute_query(
//!         &Query::table("app_user")
//!             .fields(["id", "username"])
//!             .filter("type = :type")
//!             .param("type", 1)
//!             .page(0, 20),
//!     )
//!     .await?;
//!
//! db.transaction(async |tx| {
//!     tx.table("app_user").remove(7).await?;
//!     tx.table("audit").create(record).await?;
//!     Ok(())
//! })
//! .await?;
//! ```

pub mod db;
pub use db::{Db, Table};

mod exec;
pub use exec::{execute, Executor};

mod log;
pub use log::{LogRecord, Logger, TracingLogger};

mod transaction;
pub use transaction::{IsolationLevel, Transaction, TransactionBuilder};

pub use pgbind_core::{
    async_trait, bail, driver, err,
    driver::{Connection, Driver, Queryable, Response, Row},
    stmt::Value,
    Error, Result,
};
pub use pgbind_sql::{CompiledQuery, Query, Record, Statement};

#[cfg(feature = "postgresql")]
pub use pgbind_driver_postgresql as postgresql;
