mod count;
pub use count::Count;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod update;
pub use update::Update;

use crate::{CompiledQuery, Query, Serializer};

use indexmap::IndexMap;
use pgbind_core::stmt::Value;

/// Column values in declaration order.
pub type Record = IndexMap<String, Value>;

/// A statement the serializer knows how to compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query(Query),
    Count(Count),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    pub fn count(query: Query) -> Statement {
        Count { query }.into()
    }

    /// `INSERT` of `record`, returning the value of `returning`.
    pub fn insert(table: impl Into<String>, record: Record, returning: impl Into<String>) -> Statement {
        Insert {
            table: table.into(),
            record,
            returning: Some(returning.into()),
        }
        .into()
    }

    pub fn update(
        table: impl Into<String>,
        id_field: impl Into<String>,
        id: impl Into<Value>,
        patch: Record,
    ) -> Statement {
        Update {
            table: table.into(),
            id_field: id_field.into(),
            id: id.into(),
            patch,
        }
        .into()
    }

    pub fn delete(
        table: impl Into<String>,
        id_field: impl Into<String>,
        id: impl Into<Value>,
    ) -> Statement {
        Delete {
            table: table.into(),
            id_field: id_field.into(),
            id: id.into(),
        }
        .into()
    }

    pub fn compile(&self) -> CompiledQuery {
        Serializer::postgresql().compile(self)
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Statement::Query(value)
    }
}
