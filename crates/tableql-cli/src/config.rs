use crate::utility::redact_url_password;

use anyhow::Result;
use clap::Args;
use tableql::{db, Db};

/// Connection and schema derivation options shared by every command
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Database schema to introspect
    #[arg(long, env = "TABLEQL_SCHEMA", default_value = "public")]
    pub schema: String,

    /// Column to hide from every table (repeatable)
    #[arg(long = "exclude-column", default_value = "__version__")]
    pub exclude_column: Vec<String>,

    /// Name root query fields with the plural of the table name
    #[arg(long)]
    pub plural_root_fields: bool,
}

impl Config {
    pub fn builder(&self) -> db::Builder {
        let mut builder = Db::builder();
        builder
            .schema_name(&self.schema)
            .excluded_columns(&self.exclude_column)
            .plural_root_fields(self.plural_root_fields);
        builder
    }

    pub async fn connect(&self) -> Result<Db> {
        tracing::info!(
            url = %redact_url_password(&self.database_url),
            schema = %self.schema,
            "connecting"
        );

        let db = self.builder().connect(&self.database_url).await?;

        tracing::info!(tables = db.catalog().tables.len(), "schema ready");
        Ok(db)
    }
}
