mod value;
pub(crate) use value::Value;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use postgres_types::{ToSql, Type};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use tableql_core::{
    driver::Operation,
    stmt::{self, Row},
    Driver, Error, Result,
};
use tableql_sql as sql;
use tokio_postgres::{tls::MakeTlsConnect, Client, Column, Config, Socket};
use url::Url;

#[derive(Debug)]
pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,
}

impl PostgreSQL {
    /// Initialize a tableql PostgreSQL driver using an initialized connection.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects to a PostgreSQL database using a connection string.
    ///
    /// Accepts `postgres://` and `postgresql://` URLs with a host, an optional
    /// port and credentials, and the database name as the path.
    pub async fn connect(url: &str) -> Result<Self> {
        let config = config_from_url(url)?;
        Self::connect_with_config(config, tokio_postgres::NoTls).await
    }

    /// Connects to a PostgreSQL database using a [`tokio_postgres::Config`].
    pub async fn connect_with_config<T>(config: Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config
            .connect(tls)
            .await
            .map_err(Error::driver_operation_failed)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self::new(client))
    }
}

impl From<Client> for PostgreSQL {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[tableql_core::async_trait]
impl Driver for PostgreSQL {
    async fn exec(&self, op: Operation) -> Result<Vec<Row>> {
        let (sql_as_str, params) = match op {
            Operation::QuerySql(query) => (query.sql, query.params),
            Operation::Select(select) => {
                let mut params = Vec::new();
                let sql = sql::Serializer::postgresql().serialize(&select, &mut params);
                (sql, params)
            }
        };

        tracing::trace!(sql = %sql_as_str, params = params.len(), "executing statement");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        let rows = self
            .client
            .query(&sql_as_str, &args)
            .await
            .map_err(Error::driver_operation_failed)?;

        rows.iter()
            .map(|row| {
                let mut record = Row::with_capacity(row.len());
                for (i, column) in row.columns().iter().enumerate() {
                    record.insert(column.name(), postgres_to_tableql(i, row, column)?);
                }
                Ok(record)
            })
            .collect()
    }
}

fn config_from_url(url: &str) -> Result<Config> {
    let url = Url::parse(url).map_err(|err| Error::invalid_connection_url(err.to_string()))?;

    if !matches!(url.scheme(), "postgresql" | "postgres") {
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

/// Converts a PostgreSQL value within a row to a [`tableql_core::stmt::Value`].
fn postgres_to_tableql(
    index: usize,
    row: &tokio_postgres::Row,
    column: &Column,
) -> Result<stmt::Value> {
    // NOTE: the inner representation of the PostgreSQL type enum is not
    // accessible, so we must manually match each type like so.
    let value = match *column.type_() {
        Type::BOOL => row.try_get::<_, Option<bool>>(index).map(stmt::Value::from),
        Type::INT2 => row.try_get::<_, Option<i16>>(index).map(stmt::Value::from),
        Type::INT4 => row.try_get::<_, Option<i32>>(index).map(stmt::Value::from),
        Type::INT8 => row.try_get::<_, Option<i64>>(index).map(stmt::Value::from),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map(|v| stmt::Value::from(v.map(f64::from))),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(index).map(stmt::Value::from),
        Type::NUMERIC => row
            .try_get::<_, Option<Decimal>>(index)
            .map(|v| stmt::Value::from(v.and_then(|v| v.to_f64()))),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            row.try_get::<_, Option<String>>(index).map(stmt::Value::from)
        }
        Type::UUID => row
            .try_get::<_, Option<uuid::Uuid>>(index)
            .map(stmt::Value::from),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)
            .map(stmt::Value::from),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(index)
            .map(stmt::Value::from),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(index)
            .map(|v| stmt::Value::from(v.map(|v| v.and_utc()))),
        Type::JSON | Type::JSONB => row
            .try_get::<_, Option<serde_json::Value>>(index)
            .map(stmt::Value::from),
        ref ty => {
            // Extension types such as `citext` still decode as text
            return row
                .try_get::<_, Option<String>>(index)
                .map(stmt::Value::from)
                .map_err(|_| {
                    Error::invalid_result(format!(
                        "unsupported type `{ty}` for column `{}`",
                        column.name()
                    ))
                });
        }
    };

    value.map_err(Error::driver_operation_failed)
}
