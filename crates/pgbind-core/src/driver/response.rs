use crate::stmt::Value;

use indexmap::IndexMap;

/// The outcome of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Rows returned by the statement, empty for statements without a
    /// result set.
    pub rows: Vec<Row>,

    /// Number of rows returned or affected.
    pub row_count: u64,
}

impl Response {
    /// A response for a statement that affected `count` rows and returned
    /// none.
    pub fn count(count: u64) -> Self {
        Self {
            rows: vec![],
            row_count: count,
        }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn into_first_row(self) -> Option<Row> {
        self.rows.into_iter().next()
    }
}

/// One result row: column names mapped to values, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: IndexMap::with_capacity(capacity),
        }
    }

    /// Adds a column. A repeated name overwrites the earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.columns.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    /// Returns the value of the column at `index`.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.columns.get_index(index).map(|(_, value)| value)
    }

    /// Removes and returns the value of a column.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.columns.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders the row as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.columns
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
