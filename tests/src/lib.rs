mod exec_log;
pub use exec_log::ExecLog;

pub mod fixture;
pub use fixture::Fixture;

mod isolation;
pub use isolation::TestIsolation;

pub use logging_driver::{DriverOp, LoggingDriver};

pub use memory_driver::MemoryDriver;

use std::sync::Arc;
use tableql::{db, Db, Driver};

/// Wraps `driver` in a [`LoggingDriver`], returning it with its log.
pub fn logged(driver: impl Driver) -> (Arc<dyn Driver>, ExecLog) {
    let driver = LoggingDriver::new(driver);
    let log = driver.exec_log();
    (Arc::new(driver), log)
}

/// A database built over a [`MemoryDriver`], with every operation run after
/// startup recorded in `log`.
pub struct TestDb {
    pub db: Db,
    pub log: ExecLog,
}

impl TestDb {
    /// Builds with plural root fields, the naming the end-to-end tests use.
    pub async fn new(driver: MemoryDriver) -> TestDb {
        let mut builder = Db::builder();
        builder.plural_root_fields(true);
        TestDb::with_builder(driver, &builder).await
    }

    pub async fn with_builder(driver: MemoryDriver, builder: &db::Builder) -> TestDb {
        let driver = LoggingDriver::new(driver);
        let mut log = driver.exec_log();

        let db = builder.build(driver).await.unwrap();

        // Only count what requests do
        log.clear();

        TestDb { db, log }
    }

    /// Runs `query` and returns the `data` member of the response as JSON,
    /// panicking on any error.
    pub async fn query(&self, query: &str) -> serde_json::Value {
        let response = self.db.execute(query).await;
        assert!(
            response.errors.is_empty(),
            "query failed: {:?}",
            response.errors
        );
        response.data.into_json().unwrap()
    }
}
