use super::Statement;
use crate::Query;

/// Counts the rows a query matches.
///
/// Sorting and paging of the wrapped query are dropped before it is
/// serialized, so the count covers every matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub query: Query,
}

impl From<Count> for Statement {
    fn from(value: Count) -> Self {
        Statement::Count(value)
    }
}
