mod numeric;

mod row;

mod value;
pub(crate) use value::Value;

use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod, Runtime};
use pgbind_core::{
    async_trait,
    driver::{Connection, Driver, Queryable, Response, Row},
    stmt, Error, Result,
};
use tokio_postgres::{
    error::SqlState, types::ToSql, Client, Config, NoTls, SimpleQueryMessage,
};
use url::Url;

pub use deadpool_postgres::Timeouts;

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub timeouts: Timeouts,
}

impl PoolConfig {
    /// Creates a new pool configuration with default settings.
    pub fn new() -> Self {
        Self {
            max_size: deadpool_postgres::PoolConfig::default().max_size,
            timeouts: Timeouts::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A pooled PostgreSQL driver.
pub struct PostgreSQL {
    pool: Pool,
}

impl PostgreSQL {
    /// Wraps an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Connects to a PostgreSQL database using a connection string.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(url, &PoolConfig::default()).await
    }

    /// Connects using a connection string and explicit pool settings.
    ///
    /// One connection is checked out and returned straight away so a bad
    /// host or credentials fail here rather than on the first statement.
    pub async fn connect_with(url: &str, pool_config: &PoolConfig) -> Result<Self> {
        let config = config_from_url(url)?;
        let driver = Self::from_config(config, pool_config)?;

        driver
            .pool
            .get()
            .await
            .map_err(Error::connection_pool)?;

        Ok(driver)
    }

    /// Builds the pool without opening any connection.
    pub fn from_config(config: Config, pool_config: &PoolConfig) -> Result<Self> {
        // `Clean` runs `DISCARD ALL` on recycle, which fails for a connection
        // abandoned inside a transaction, so such a connection is dropped
        // instead of being handed out again.
        let manager = Manager::from_config(
            config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Clean,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(pool_config.max_size)
            .timeouts(pool_config.timeouts)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(Error::connection_pool)?;

        Ok(Self::new(pool))
    }
}

impl core::fmt::Debug for PostgreSQL {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgreSQL")
            .field("status", &self.pool.status())
            .finish()
    }
}

/// Parses a `postgres://` or `postgresql://` URL into a client config.
pub fn config_from_url(url: &str) -> Result<Config> {
    let url = Url::parse(url).map_err(|err| Error::invalid_connection_url(err.to_string()))?;

    if url.scheme() != "postgresql" && url.scheme() != "postgres" {
        return Err(Error::invalid_connection_url(format!(
            "connection URL does not have a `postgresql` scheme; url={url}"
        )));
    }

    let host = url.host_str().ok_or_else(|| {
        Error::invalid_connection_url(format!("missing host in connection URL; url={url}"))
    })?;

    let dbname = url.path().trim_start_matches('/');
    if dbname.is_empty() {
        return Err(Error::invalid_connection_url(format!(
            "no database specified - missing path in connection URL; url={url}"
        )));
    }

    let mut config = Config::new();
    config.host(host);
    config.dbname(dbname);

    if let Some(port) = url.port() {
        config.port(port);
    }

    if !url.username().is_empty() {
        config.user(url.username());
    }

    if let Some(password) = url.password() {
        config.password(password);
    }

    Ok(config)
}

#[async_trait]
impl Queryable for PostgreSQL {
    async fn query(&self, sql: &str, params: &[stmt::Value]) -> Result<Response> {
        let client = self.pool.get().await.map_err(Error::connection_pool)?;
        exec(&client, sql, params).await
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        let client = self.pool.get().await.map_err(Error::connection_pool)?;
        Ok(Box::new(PostgreSQLConnection { client }))
    }
}

/// A connection checked out of the pool. Dropping it returns it to the pool.
pub struct PostgreSQLConnection {
    client: Object,
}

impl core::fmt::Debug for PostgreSQLConnection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgreSQLConnection").finish_non_exhaustive()
    }
}

#[async_trait]
impl Queryable for PostgreSQLConnection {
    async fn query(&self, sql: &str, params: &[stmt::Value]) -> Result<Response> {
        exec(&self.client, sql, params).await
    }
}

impl Connection for PostgreSQLConnection {
    fn release(self: Box<Self>) {
        tracing::trace!("returning connection to the pool");
    }
}

async fn exec(client: &Client, sql: &str, params: &[stmt::Value]) -> Result<Response> {
    let statement = match client.prepare(sql).await {
        Ok(statement) => statement,
        // The extended protocol takes a single statement. A parameterless
        // batch goes through the simple protocol instead.
        Err(err)
            if params.is_empty()
                && err
                    .as_db_error()
                    .is_some_and(|db| is_multi_statement(db.code(), db.message())) =>
        {
            let messages = client
                .simple_query(sql)
                .await
                .map_err(Error::driver_operation_failed)?;
            return Ok(simple_response(messages));
        }
        Err(err) => return Err(Error::driver_operation_failed(err)),
    };

    let params = params.iter().map(Value).collect::<Vec<_>>();
    let args = params
        .iter()
        .map(|param| param as &(dyn ToSql + Sync))
        .collect::<Vec<_>>();

    if statement.columns().is_empty() {
        let count = client
            .execute(&statement, &args)
            .await
            .map_err(Error::driver_operation_failed)?;
        return Ok(Response::count(count));
    }

    let rows = client
        .query(&statement, &args)
        .await
        .map_err(Error::driver_operation_failed)?;

    rows.iter()
        .map(row::from_postgres)
        .collect::<Result<Vec<_>>>()
        .map(Response::from_rows)
}

/// Whether `prepare` was rejected because the text holds several commands.
fn is_multi_statement(code: &SqlState, message: &str) -> bool {
    *code == SqlState::SYNTAX_ERROR && message.contains("multiple commands")
}

/// Rows of the simple protocol carry text only; every value is a string or
/// null.
fn simple_response(messages: Vec<SimpleQueryMessage>) -> Response {
    let mut rows = vec![];
    let mut row_count = 0;

    for message in messages {
        match message {
            SimpleQueryMessage::Row(row) => {
                let mut values = Row::with_capacity(row.len());
                for (index, column) in row.columns().iter().enumerate() {
                    let value = row
                        .get(index)
                        .map(|text| stmt::Value::String(text.to_string()))
                        .unwrap_or_default();
                    values.insert(column.name(), value);
                }
                rows.push(values);
            }
            SimpleQueryMessage::CommandComplete(count) => row_count += count,
            _ => {}
        }
    }

    Response { rows, row_count }
}
