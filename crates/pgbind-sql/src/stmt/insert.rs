use super::{Record, Statement};

/// Inserts one record, with columns in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub record: Record,

    /// Column to return, usually the generated id.
    pub returning: Option<String>,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
