use crate::{Loader, LoaderConfig};

use tableql_core::{
    schema::db::{Catalog, ColumnRef},
    Driver, Error, Result,
};

use std::{collections::HashMap, sync::Arc};

/// One loader for each end of every foreign key.
///
/// A registry lives for one request. Loaders cache what they load, so a
/// fresh registry per request keeps one request from seeing rows cached by
/// another.
#[derive(Debug)]
pub struct LoaderRegistry {
    loaders: HashMap<ColumnRef, Loader>,
}

impl LoaderRegistry {
    pub fn new(catalog: &Catalog, driver: Arc<dyn Driver>, config: &LoaderConfig) -> LoaderRegistry {
        let loaders = catalog
            .loader_keys()
            .into_iter()
            .map(|key| {
                let mut loader = Loader::new(key.clone(), driver.clone(), *config);
                if let Some(schema) = &catalog.schema {
                    loader = loader.in_schema(schema);
                }
                (key, loader)
            })
            .collect();

        LoaderRegistry { loaders }
    }

    /// The loader for `key`.
    pub fn get(&self, key: &ColumnRef) -> Result<&Loader> {
        self.loaders.get(key).ok_or_else(|| {
            tracing::error!(loader = %key, "relationship field has no loader");
            Error::missing_loader(key.to_string())
        })
    }

    pub fn contains(&self, key: &ColumnRef) -> bool {
        self.loaders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ColumnRef> {
        self.loaders.keys()
    }
}
