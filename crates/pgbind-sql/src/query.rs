use crate::{serializer::CompiledQuery, Serializer};

use indexmap::IndexMap;
use pgbind_core::stmt::Value;
use serde::{Deserialize, Serialize};

/// Declarative description of a `SELECT`.
///
/// A query either targets a `table` or carries a raw `query_text`. When both
/// are set, `query_text` wins:
///
/// * with no `fields` and no `where_clause`, `query_text` is used verbatim,
///   which also allows batches of several statements;
/// * otherwise it is wrapped as
///   `SELECT <projection> FROM (<query_text>) AS T [WHERE <where_clause>]`.
///
/// Filters and raw text reference named parameters as `:name`; each
/// occurrence is rewritten to the next `$n` placeholder during compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    /// Relation to select from when no `query_text` is given.
    pub table: Option<String>,

    /// Raw SQL used as the statement body.
    pub query_text: Option<String>,

    /// Boolean SQL expression, emitted as `WHERE <where_clause>`.
    pub where_clause: Option<String>,

    /// Columns to project, each emitted as `<field> as "<field>"`. Empty
    /// projects `*`.
    pub fields: Vec<String>,

    /// Sort entries of the form `<column>|<ASC|DESC>`.
    pub sort_by: Vec<String>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,

    /// Zero-based page. Together with `rows_per_page` it overrides `limit`
    /// and `offset`.
    pub page_index: Option<i64>,

    pub rows_per_page: Option<i64>,

    /// Named parameters, in insertion order.
    pub params: IndexMap<String, Value>,
}

impl Query {
    /// Selects from `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Uses `query_text` as the statement body.
    pub fn raw(query_text: impl Into<String>) -> Self {
        Self {
            query_text: Some(query_text.into()),
            ..Self::default()
        }
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `WHERE` expression.
    pub fn filter(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    pub fn sort_by<I>(mut self, sort_by: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort_by = sort_by.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Requests page `page_index` (zero-based) of `rows_per_page` rows.
    pub fn page(mut self, page_index: i64, rows_per_page: i64) -> Self {
        self.page_index = Some(page_index);
        self.rows_per_page = Some(rows_per_page);
        self
    }

    /// Binds the named parameter `:name`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The `(limit, offset)` pair after paging is resolved.
    pub fn paging(&self) -> (Option<i64>, Option<i64>) {
        match (self.page_index, self.rows_per_page) {
            (Some(page_index), Some(rows_per_page)) => (
                Some(rows_per_page),
                Some(rows_per_page.saturating_mul(page_index)),
            ),
            _ => (self.limit, self.offset),
        }
    }

    /// Returns a copy without sorting or paging, as used to count matching
    /// rows.
    pub fn unpaged(&self) -> Query {
        Query {
            sort_by: vec![],
            limit: None,
            offset: None,
            page_index: None,
            rows_per_page: None,
            ..self.clone()
        }
    }

    /// Compiles the query into statement text and positional parameters.
    pub fn compile(&self) -> CompiledQuery {
        Serializer::postgresql().compile_query(self)
    }
}
