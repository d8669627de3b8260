use crate::Executor;

use pgbind_core::{driver::Row, stmt::Value, Result};
use pgbind_sql::{Query, Record, Statement};

/// Row-level helpers for a single table, keyed by an id column.
///
/// Obtained from [`Executor::table`], so the same helpers run on the pool or
/// inside a transaction.
pub struct Table<'a> {
    executor: &'a dyn Executor,
    name: String,
    id_field: String,
}

impl<'a> Table<'a> {
    pub(crate) fn new(executor: &'a dyn Executor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
            id_field: "id".to_string(),
        }
    }

    /// Keys rows by `id_field` instead of `id`.
    pub fn id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts `record` and returns the id the database assigned, or
    /// [`Value::Null`] when no row comes back.
    pub async fn create(&self, record: Record) -> Result<Value> {
        let compiled = Statement::insert(&self.name, record, &self.id_field).compile();
        let row = self.executor.execute_compiled(&compiled).await?.into_first_row();

        Ok(row
            .and_then(|mut row| row.take(&self.id_field))
            .unwrap_or_default())
    }

    /// Sets the columns of `patch` on the row keyed by `id`. An empty patch
    /// issues no statement.
    pub async fn update(&self, id: impl Into<Value>, patch: Record) -> Result<u64> {
        let stmt = Statement::update(&self.name, &self.id_field, id, patch);

        if let Statement::Update(update) = &stmt {
            if update.is_noop() {
                return Ok(0);
            }
        }

        let response = self.executor.execute_compiled(&stmt.compile()).await?;
        Ok(response.row_count)
    }

    /// Deletes the row keyed by `id`, returning the number of rows removed.
    pub async fn remove(&self, id: impl Into<Value>) -> Result<u64> {
        let compiled = Statement::delete(&self.name, &self.id_field, id).compile();
        let response = self.executor.execute_compiled(&compiled).await?;
        Ok(response.row_count)
    }

    /// Loads the row keyed by `id` with all columns.
    pub async fn get_by_id(&self, id: impl Into<Value>) -> Result<Option<Row>> {
        self.get_fields_by_id(id, Vec::<String>::new()).await
    }

    /// Loads the row keyed by `id`, projecting only `fields`.
    pub async fn get_fields_by_id<I>(&self, id: impl Into<Value>, fields: I) -> Result<Option<Row>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let query = Query::table(&self.name)
            .fields(fields)
            .filter(format!("{} = :id", self.id_field))
            .param("id", id);

        let rows = self.executor.execute_query(&query).await?;
        Ok(rows.into_iter().next())
    }
}

impl core::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("id_field", &self.id_field)
            .finish()
    }
}
