use super::{params::Bind, Comma, Formatter, Params, Placeholder, ToSql};

use crate::stmt::{Count, Delete, Insert, Statement, Update};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Count(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Count {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let unpaged = self.query.unpaged();
        let query = &unpaged;
        fmt!(f, "SELECT COUNT(*) AS count FROM (" query ") AS T");
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;

        if self.record.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
        } else {
            let columns = Comma(self.record.keys());
            let values = Comma(self.record.values().map(Bind));
            fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
        }

        if let Some(returning) = &self.returning {
            fmt!(f, " RETURNING " returning);
        }
    }
}

/// `column = $n`
struct Assignment<'a>(&'a str, Placeholder);

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.0 " = " self.1);
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        // Placeholders follow the patch order, then the id.
        let assignments = self
            .patch
            .iter()
            .map(|(column, value)| Assignment(column.as_str(), f.params.push(value)))
            .collect::<Vec<_>>();
        let id = f.params.push(&self.id);

        let table = &self.table;
        let id_field = &self.id_field;
        fmt!(f, "UPDATE " table " SET " Comma(assignments) " WHERE " id_field " = " id);
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        let id_field = &self.id_field;
        fmt!(f, "DELETE FROM " table " WHERE " id_field " = " Bind(&self.id));
    }
}
