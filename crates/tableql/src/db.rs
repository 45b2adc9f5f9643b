mod builder;
pub use builder::Builder;

use crate::{LoaderConfig, LoaderRegistry};

use tableql_core::{schema::db::Catalog, Driver, Schema};

use async_graphql::{dynamic, Request, Response};
use std::sync::Arc;

/// A GraphQL API derived from a database schema.
///
/// Cloning is cheap; clones share the schema and the driver.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

struct Shared {
    /// The derived object graph
    schema: Arc<Schema>,

    /// Executable schema lowered from `schema`
    gql: dynamic::Schema,

    driver: Arc<dyn Driver>,

    loader_config: LoaderConfig,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Introspects the PostgreSQL database at `url` with default settings.
    #[cfg(feature = "postgresql")]
    pub async fn connect(url: &str) -> tableql_core::Result<Db> {
        Builder::default().connect(url).await
    }

    /// Runs one GraphQL request.
    ///
    /// Each request gets its own loaders, so rows cached while resolving one
    /// request are never seen by another.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let registry = LoaderRegistry::new(
            self.catalog(),
            self.shared.driver.clone(),
            &self.shared.loader_config,
        );

        let request = request.into().data(registry);
        self.shared.gql.execute(request).await
    }

    /// The schema in GraphQL SDL.
    pub fn sdl(&self) -> String {
        self.shared.gql.sdl()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shared.schema.db
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.shared.driver
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("schema", &self.shared.schema)
            .field("driver", &self.shared.driver)
            .field("loader_config", &self.shared.loader_config)
            .finish_non_exhaustive()
    }
}
