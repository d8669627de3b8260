use super::{Record, Statement};

use pgbind_core::stmt::Value;

/// Updates the row whose `id_field` equals `id`, setting each column of
/// `patch` in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub id_field: String,
    pub id: Value,
    pub patch: Record,
}

impl Update {
    /// An update with nothing to set issues no statement.
    pub fn is_noop(&self) -> bool {
        self.patch.is_empty()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
