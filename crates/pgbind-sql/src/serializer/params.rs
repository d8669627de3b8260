use super::{Formatter, ToSql};

use pgbind_core::stmt::Value;

/// Accumulates the values bound to placeholders.
///
/// Each push allocates the next placeholder; the accumulator is the only
/// place the running counter lives.
pub trait Params {
    fn push(&mut self, value: &Value) -> Placeholder;
}

/// A positional placeholder, rendered as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl core::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a `String` cannot fail
        let _ = write!(f.dst, "{self}");
    }
}

/// A value to bind at the current position.
pub(super) struct Bind<'a>(pub(super) &'a Value);

impl ToSql for Bind<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.0);
        placeholder.to_sql(f);
    }
}
