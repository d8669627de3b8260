use super::{Formatter, Params};

/// Writes each fragment in turn. Fragments are separated by whitespace only:
/// `fmt!(f, "SELECT " projection " FROM " table)`.
macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

/// A piece of statement text. Fragments that bind values push them onto the
/// formatter's params as they are written.
pub(super) trait ToSql {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>);
}

impl ToSql for &str {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}

impl ToSql for char {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push(self);
    }
}
