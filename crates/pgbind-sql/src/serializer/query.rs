use super::{
    ident::SortEntry, named::Named, params::Bind, Comma, Delimited, FieldAlias, Formatter,
    Params, ToSql,
};

use crate::Query;

use pgbind_core::stmt::Value;

/// The `SELECT` list: `*`, or every field aliased to its own name.
struct Projection<'a>(&'a [String]);

impl ToSql for Projection<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.0.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Delimited(self.0.iter().map(FieldAlias), ","));
        }
    }
}

impl ToSql for &Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // LIMIT/OFFSET placeholders are allocated while the body is built,
        // ahead of every named parameter.
        let mut body = String::new();
        let mut body_fmt = Formatter {
            dst: &mut body,
            params: &mut *f.params,
        };
        let f2 = &mut body_fmt;

        let query_text = self.query_text.as_deref().filter(|text| !text.is_empty());
        let where_clause = self
            .where_clause
            .as_deref()
            .filter(|clause| !clause.is_empty());
        let projection = Projection(&self.fields);

        match query_text {
            Some(text) if self.fields.is_empty() && where_clause.is_none() => fmt!(f2, text),
            Some(text) => fmt!(f2, "SELECT " projection " FROM (" text ") AS T"),
            None => {
                let table = self.table.as_deref().unwrap_or_default();
                fmt!(f2, "SELECT " projection " FROM " table);
            }
        }

        // A verbatim body ignores `where_clause`, which is `None` on that path.
        if let Some(clause) = where_clause {
            fmt!(f2, " WHERE " clause);
        }

        if !self.sort_by.is_empty() {
            fmt!(f2, " ORDER BY " Comma(self.sort_by.iter().map(SortEntry)));
        }

        let (limit, offset) = self.paging();

        if let Some(limit) = limit {
            fmt!(f2, " LIMIT " Bind(&Value::I64(limit)));
        }

        if let Some(offset) = offset {
            fmt!(f2, " OFFSET " Bind(&Value::I64(offset)));
        }

        Named {
            text: &body,
            params: &self.params,
        }
        .to_sql(f);
    }
}
