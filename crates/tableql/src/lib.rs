pub mod db;
pub use db::Db;

pub mod graphql;

pub mod introspect;

pub mod loader;
pub use loader::{Loader, LoaderConfig, LoaderState};

mod registry;
pub use registry::LoaderRegistry;

pub use tableql_core::{
    async_trait,
    driver::{self, Driver},
    schema::{self, Schema},
    stmt, Error, Result,
};

pub use async_graphql;
