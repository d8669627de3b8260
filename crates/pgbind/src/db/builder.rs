use super::Db;
use crate::Logger;

use pgbind_core::driver::Driver;

#[cfg(feature = "postgresql")]
use pgbind_core::Result;
#[cfg(feature = "postgresql")]
use pgbind_driver_postgresql::{PoolConfig, PostgreSQL, Timeouts};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Receives every successfully executed statement
    log: Option<Arc<dyn Logger>>,

    #[cfg(feature = "postgresql")]
    pool: PoolConfig,
}

impl Builder {
    /// Reports each executed statement to `logger`.
    pub fn log(&mut self, logger: impl Logger + 'static) -> &mut Self {
        self.log = Some(Arc::new(logger));
        self
    }

    /// Maximum number of pooled connections.
    #[cfg(feature = "postgresql")]
    pub fn max_pool_size(&mut self, max_size: usize) -> &mut Self {
        self.pool.max_size = max_size;
        self
    }

    /// Timeouts for waiting on, creating and recycling pooled connections.
    #[cfg(feature = "postgresql")]
    pub fn pool_timeouts(&mut self, timeouts: Timeouts) -> &mut Self {
        self.pool.timeouts = timeouts;
        self
    }

    /// Builds a handle on top of an already constructed driver.
    pub fn build(&self, driver: impl Driver + 'static) -> Db {
        Db {
            driver: Arc::new(driver),
            log: self.log.clone(),
        }
    }

    /// Opens a pool to the PostgreSQL database at `url`.
    #[cfg(feature = "postgresql")]
    pub async fn connect(&self, url: &str) -> Result<Db> {
        let driver = PostgreSQL::connect_with(url, &self.pool).await?;
        tracing::debug!(?driver, "connected");
        Ok(self.build(driver))
    }
}

impl core::fmt::Debug for Builder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("Builder");
        s.field("log", &self.log.is_some());
        #[cfg(feature = "postgresql")]
        s.field("pool", &self.pool);
        s.finish()
    }
}
