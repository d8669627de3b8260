pub mod driver;
pub use driver::{Connection, Driver, Queryable};

mod error;
pub use error::{Error, IntoError};

pub mod stmt;
pub use stmt::Value;

/// A Result type alias that uses pgbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
