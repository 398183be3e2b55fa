// SPDX-License-Identifier: MIT OR Apache-2.0

//! DAO association contract.
//!
//! Every persistable entity type names the data-access object responsible for
//! it. A DAO refers to a named database connection whose settings live in the
//! configuration store under `db.<connection>.*`.

use crate::domain::{ConfigKey, ConfigurationService, Result};
use std::fmt;

/// A data-access object responsible for persisting one entity type.
pub trait Dao: Send + Sync {
    /// The entity type this DAO persists.
    fn entity_name(&self) -> &str;

    /// The configured connection this DAO uses.
    fn connection(&self) -> &str;

    /// Reads this DAO's connection settings from the configuration.
    fn connection_settings(&self, config: &dyn ConfigurationService) -> Result<ConnectionSettings> {
        ConnectionSettings::from_config(config, self.connection())
    }
}

/// An entity type with a type-level DAO lookup.
///
/// ```
/// use ministruts::domain::{Dao, PersistableObject};
///
/// struct OrderDao;
///
/// impl Dao for OrderDao {
///     fn entity_name(&self) -> &str { "Order" }
///     fn connection(&self) -> &str { "main" }
/// }
///
/// struct Order;
///
/// impl PersistableObject for Order {
///     fn dao() -> &'static dyn Dao {
///         static DAO: OrderDao = OrderDao;
///         &DAO
///     }
/// }
///
/// assert_eq!(Order::dao().entity_name(), "Order");
/// ```
pub trait PersistableObject {
    /// Returns the DAO responsible for this type.
    fn dao() -> &'static dyn Dao;
}

/// Connection settings for a named database connection.
///
/// The `Debug` output hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// The connection name, e.g. `main`
    pub name: String,
    /// The connector (driver) name, e.g. `mysql` or `pgsql`
    pub connector: String,
    /// Host name; `localhost` unless configured
    pub host: String,
    /// Port, if configured
    pub port: Option<u16>,
    /// Database or schema name, if configured
    pub database: Option<String>,
    /// User name, if configured
    pub username: Option<String>,
    /// Password, if configured
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// Reads `db.<name>.*` from the configuration.
    ///
    /// `connector` is required; a missing connector is reported as
    /// [`crate::domain::ConfigError::ConfigKeyNotFound`]. `host` falls back to
    /// `localhost`. Everything else is optional.
    pub fn from_config(config: &dyn ConfigurationService, name: &str) -> Result<Self> {
        let base = ConfigKey::new("db")?.join(name)?;

        let connector = config.get_string(&base.join("connector")?)?;
        let host = match config.get_optional_string(&base.join("host")?)? {
            Some(host) => host,
            None => "localhost".to_string(),
        };
        let port_key = base.join("port")?;
        let port = if config.has(&port_key) {
            Some(config.get_u16(&port_key)?)
        } else {
            None
        };

        Ok(Self {
            name: name.to_string(),
            connector,
            host,
            port,
            database: config.get_optional_string(&base.join("database")?)?,
            username: config.get_optional_string(&base.join("username")?)?,
            password: config.get_optional_string(&base.join("password")?)?,
        })
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("name", &self.name)
            .field("connector", &self.connector)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
