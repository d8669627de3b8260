mod response;
pub use response::{Response, Row};

use crate::{async_trait, stmt::Value, Result};

use std::fmt::Debug;

/// Anything a statement can be issued against: a pool or a single checked-out
/// connection.
#[async_trait]
pub trait Queryable: Debug + Send + Sync {
    /// Issues `sql` with `params` bound to `$1..$n`, returning the rows
    /// produced by the statement.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Response>;
}

/// A connection checked out of a [`Driver`].
///
/// Statements issued on one connection run in order on the same database
/// session, which is what makes `BEGIN`/`COMMIT` meaningful.
pub trait Connection: Queryable {
    /// Returns the connection to the pool it was checked out of. Dropping a
    /// connection without calling `release` releases it as well.
    fn release(self: Box<Self>) {}
}

/// A pooled database driver.
#[async_trait]
pub trait Driver: Queryable {
    /// Checks out a dedicated connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}
