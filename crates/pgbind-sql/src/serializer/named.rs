use super::{Formatter, Params, ToSql};

use indexmap::IndexMap;
use pgbind_core::stmt::Value;

/// Rewrites `:name` tokens in `text` into positional placeholders, writing
/// the result to the formatter.
///
/// The text is scanned once, left to right. At each `:` the longest bound
/// name that follows it is substituted, provided the name is not directly
/// followed by another identifier character, so `:id` never matches the
/// front of `:id2`. Names may hold any characters (`:café`, `:user.id`).
/// Each occurrence allocates a fresh placeholder and binds its own copy of
/// the value. `::` (a cast) is never a token. Unknown names are left as they
/// are.
pub(super) struct Named<'a> {
    pub(super) text: &'a str,
    pub(super) params: &'a IndexMap<String, Value>,
}

impl Named<'_> {
    /// The longest bound name `after` starts with, ending on a token boundary.
    fn longest_match(&self, after: &str) -> Option<(&str, &Value)> {
        self.params
            .iter()
            .filter(|(name, _)| !name.is_empty() && after.starts_with(name.as_str()))
            .filter(|(name, _)| !after[name.len()..].starts_with(is_ident_char))
            .max_by_key(|(name, _)| name.len())
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl ToSql for Named<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.params.is_empty() {
            f.dst.push_str(self.text);
            return;
        }

        let mut rest = self.text;

        while let Some(pos) = rest.find(':') {
            f.dst.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(cast) = after.strip_prefix(':') {
                f.dst.push_str("::");
                rest = cast;
                continue;
            }

            match self.longest_match(after) {
                Some((name, value)) => {
                    let placeholder = f.params.push(value);
                    placeholder.to_sql(f);
                    rest = &after[name.len()..];
                }
                None => {
                    f.dst.push(':');
                    rest = after;
                }
            }
        }

        f.dst.push_str(rest);
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
