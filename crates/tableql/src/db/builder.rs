use super::{Db, Shared};
use crate::{graphql, introspect::Introspector, LoaderConfig};

use tableql_core::{schema, Driver, Result};

use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct Builder {
    introspector: Introspector,

    /// Schema builder
    core: schema::Builder,

    loader_config: LoaderConfig,
}

impl Builder {
    /// The database schema to introspect. Defaults to `public`.
    pub fn schema_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.introspector.schema_name(name);
        self
    }

    /// Hide a bookkeeping column from every table. `__version__` is always
    /// hidden unless [`Builder::excluded_columns`] replaces the list.
    pub fn exclude_column(&mut self, name: impl Into<String>) -> &mut Self {
        self.introspector.exclude_column(name);
        self
    }

    pub fn excluded_columns<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.introspector.excluded_columns(names);
        self
    }

    /// How many times a loader waits for sibling resolvers before running a
    /// batch.
    pub fn batch_yield_count(&mut self, count: usize) -> &mut Self {
        self.loader_config.batch_yield_count = count;
        self
    }

    /// Name root fields with the plural of the table name.
    pub fn plural_root_fields(&mut self, enabled: bool) -> &mut Self {
        self.core.plural_root_fields(enabled);
        self
    }

    /// Introspects the database behind `driver` and builds the API.
    ///
    /// Fails without a partial schema if the catalog cannot be read or does
    /// not map onto a valid schema.
    pub async fn build(&self, driver: impl Driver) -> Result<Db> {
        self.build_with(Arc::new(driver)).await
    }

    pub async fn build_with(&self, driver: Arc<dyn Driver>) -> Result<Db> {
        let catalog = self.introspector.introspect(&*driver).await?;

        tracing::debug!(
            tables = catalog.tables.len(),
            foreign_keys = catalog.foreign_keys.len(),
            "building schema"
        );

        let schema = Arc::new(self.core.build(catalog)?);
        let gql = graphql::build(&schema, driver.clone())?;

        Ok(Db {
            shared: Arc::new(Shared {
                schema,
                gql,
                driver,
                loader_config: self.loader_config,
            }),
        })
    }

    #[cfg(feature = "postgresql")]
    pub async fn connect(&self, url: &str) -> Result<Db> {
        let driver = tableql_driver_postgresql::PostgreSQL::connect(url).await?;
        self.build(driver).await
    }
}
