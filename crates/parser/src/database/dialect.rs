//! SQL dialects and connection settings

use openapi_docgen_common::{DocgenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    PostgreSql,
    Oracle,
    SqlServer,
    H2,
    /// Any other product; catalog access still works, URL building does not
    Generic,
}

impl Dialect {
    /// Pick a dialect from a configured database type (case-insensitive)
    ///
    /// Unknown types fall back to [`Dialect::Generic`].
    pub fn from_database_type(database_type: &str) -> Self {
        match database_type.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Dialect::MySql,
            "postgresql" | "postgres" => Dialect::PostgreSql,
            "oracle" => Dialect::Oracle,
            "sqlserver" | "mssql" => Dialect::SqlServer,
            "h2" => Dialect::H2,
            _ => Dialect::Generic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
            Dialect::H2 => "h2",
            Dialect::Generic => "generic",
        }
    }

    pub fn default_port(&self) -> Option<u16> {
        match self {
            Dialect::MySql => Some(3306),
            Dialect::PostgreSql => Some(5432),
            Dialect::Oracle => Some(1521),
            Dialect::SqlServer => Some(1433),
            Dialect::H2 | Dialect::Generic => None,
        }
    }

    /// Schema searched when the configuration names none
    ///
    /// MySQL schemas are databases and Oracle schemas are users.
    pub fn default_schema(&self, config: &ConnectionConfig) -> Option<String> {
        match self {
            Dialect::PostgreSql => Some("public".to_string()),
            Dialect::SqlServer => Some("dbo".to_string()),
            Dialect::MySql => non_empty(&config.database_name).map(str::to_string),
            Dialect::Oracle => config.username.as_deref().and_then(non_empty).map(str::to_string),
            Dialect::H2 | Dialect::Generic => None,
        }
    }

    /// Spell an identifier the way the catalog stores it
    ///
    /// Oracle folds unquoted identifiers to upper case.
    pub fn normalize_identifier(&self, identifier: &str) -> String {
        match self {
            Dialect::Oracle => identifier.to_uppercase(),
            _ => identifier.to_string(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for reaching one database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionConfig {
    /// mysql, postgresql, oracle, sqlserver, h2, ...
    pub database_type: String,
    pub host: Option<String>,

    /// Dialect default when absent
    pub port: Option<u16>,

    pub database_name: String,
    pub username: Option<String>,

    #[serde(skip_serializing)]
    pub password: Option<String>,

    pub schema: Option<String>,

    /// Explicit connection URL; wins over the parts above
    pub url: Option<String>,
}

impl ConnectionConfig {
    pub fn dialect(&self) -> Dialect {
        Dialect::from_database_type(&self.database_type)
    }

    /// Whether enough is set to open a connection
    pub fn is_valid(&self) -> bool {
        if non_empty(&self.database_type).is_none() {
            return false;
        }
        if self.url.as_deref().and_then(non_empty).is_some() {
            return true;
        }

        let has_database = non_empty(&self.database_name).is_some();
        match self.dialect() {
            Dialect::H2 => has_database,
            _ => has_database && self.host.as_deref().and_then(non_empty).is_some(),
        }
    }

    /// Connection URL for this configuration
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = self.url.as_deref().and_then(non_empty) {
            return Ok(url.to_string());
        }

        let dialect = self.dialect();
        let host = self.host.as_deref().unwrap_or("localhost");
        let port = self.port.or(dialect.default_port()).unwrap_or_default();
        let database = &self.database_name;

        let url = match dialect {
            Dialect::MySql => format!("mysql://{}:{}/{}", host, port, database),
            Dialect::PostgreSql => format!("postgresql://{}:{}/{}", host, port, database),
            Dialect::Oracle => format!("oracle://{}:{}/{}", host, port, database),
            Dialect::SqlServer => {
                format!("sqlserver://{}:{};databaseName={}", host, port, database)
            }
            Dialect::H2 => format!("h2:mem:{}", database),
            Dialect::Generic => {
                return Err(DocgenError::Database(format!(
                    "Unsupported database type '{}': set an explicit connection url",
                    self.database_type
                )))
            }
        };

        Ok(url)
    }

    /// Configured schema, or the dialect default, spelled for the catalog
    pub fn effective_schema(&self) -> Option<String> {
        let dialect = self.dialect();
        self.schema
            .as_deref()
            .and_then(non_empty)
            .map(str::to_string)
            .or_else(|| dialect.default_schema(self))
            .map(|schema| dialect.normalize_identifier(&schema))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
