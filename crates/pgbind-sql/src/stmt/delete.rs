use super::Statement;

use pgbind_core::stmt::Value;

/// `DELETE FROM <table> WHERE <id_field> = $1`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub id_field: String,
    pub id: Value,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
