use super::{connect, Db, DEFAULT_SLOW_QUERY};

use petrel_core::{driver::Connection, Result};

use std::time::Duration;

#[derive(Debug)]
pub struct Builder {
    slow_query: Duration,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            slow_query: DEFAULT_SLOW_QUERY,
        }
    }
}

impl Builder {
    /// Statements that take longer are logged at `warn` with a `!SLOW!`
    /// marker.
    pub fn slow_query_threshold(&mut self, threshold: Duration) -> &mut Self {
        self.slow_query = threshold;
        self
    }

    pub fn build(&self, connection: impl Connection + 'static) -> Db {
        Db::from_parts(Box::new(connection), self.slow_query)
    }

    pub fn connect(&self, url: &str) -> Result<Db> {
        let connection = connect::connect(url)?;
        Ok(Db::from_parts(connection, self.slow_query))
    }
}
