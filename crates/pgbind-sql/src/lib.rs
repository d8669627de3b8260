//! Compiles query descriptors and CRUD statements into PostgreSQL statement
//! text with `$n` placeholders and the matching positional argument list.
//!
//! Compilation is pure: it performs no I/O, touches no shared state and never
//! fails. Caller-supplied SQL fragments (table names, filters, sort entries)
//! are passed through as they are.

pub mod query;
pub use query::Query;

pub mod serializer;
pub use serializer::{CompiledQuery, Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{Count, Delete, Insert, Record, Statement, Update};
