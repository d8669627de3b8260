use super::{Formatter, Params, ToSql};

/// A projected column, aliased to its own name: `field as "field"`.
pub(super) struct FieldAlias<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for FieldAlias<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let field = self.0.as_ref();
        fmt!(f, field " as " '"' field '"');
    }
}

/// One `column|DIRECTION` sort entry, rendered as `column DIRECTION`.
pub(super) struct SortEntry<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for SortEntry<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let entry = self.0.as_ref();
        match entry.split_once('|') {
            Some((column, direction)) => fmt!(f, column ' ' direction),
            None => fmt!(f, entry),
        }
    }
}
