#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::FieldAlias;

mod named;

mod params;
pub use params::{Params, Placeholder};

// Statement serializers
mod query;
mod statement;

use crate::{stmt::Statement, Query};

use pgbind_core::stmt::Value;

/// Statement text plus the values bound to its placeholders.
///
/// `params[i - 1]` is the value bound to `$i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledQuery {
    pub query_text: String,
    pub params: Vec<Value>,
}

impl CompiledQuery {
    pub fn new(query_text: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            query_text: query_text.into(),
            params,
        }
    }
}

/// Serializes statements to PostgreSQL text.
///
/// The serializer is stateless; the placeholder counter lives in the
/// [`Params`] accumulator handed to each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// A serializer emitting `$n` positional placeholders.
    pub fn postgresql() -> Serializer {
        Serializer { _priv: () }
    }

    /// Serializes `stmt`, pushing bound values onto `params`.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        self.render(stmt, params)
    }

    /// Serializes `stmt` into a fresh [`CompiledQuery`].
    pub fn compile(&self, stmt: &Statement) -> CompiledQuery {
        let mut params = Vec::new();
        let query_text = self.render(stmt, &mut params);
        CompiledQuery { query_text, params }
    }

    /// Compiles a query descriptor into a fresh [`CompiledQuery`].
    pub fn compile_query(&self, query: &Query) -> CompiledQuery {
        let mut params = Vec::new();
        let query_text = self.render(query, &mut params);
        CompiledQuery { query_text, params }
    }

    fn render(&self, stmt: impl ToSql, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret
    }
}
