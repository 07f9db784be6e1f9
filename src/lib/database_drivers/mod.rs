use crate::config::Engine;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub mod command;
pub mod executor;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod target;

pub use target::ConnectionTarget;

/// Username and password handed to the server or the dump tool unmodified.
/// An empty field leaves the userinfo of the connection url in effect.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct DumpRequest {
    pub target: ConnectionTarget,
    pub credentials: Credentials,
    pub output: PathBuf,
}

// DatabaseDriver is the strategy every supported engine implements
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    fn engine(&self) -> Engine;

    // create the target database through the administrative connection
    async fn create_database(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
    ) -> Result<()>;

    // drop the target database, a missing database is not an error
    async fn drop_database(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
    ) -> Result<()>;

    // dump the target database with the vendor tool
    async fn dump_database(&self, request: &DumpRequest) -> Result<()>;
}

// Creates the strategy for the given engine
pub fn new(engine: Engine) -> Result<Box<dyn DatabaseDriver>> {
    match engine {
        #[cfg(feature = "postgres")]
        Engine::Postgres => Ok(Box::new(postgres::PostgresDriver::new())),
        #[cfg(feature = "mysql")]
        Engine::MySQL => Ok(Box::new(mysql::MySQLDriver::new())),
        #[allow(unreachable_patterns)]
        _ => {
            let feature = match engine {
                Engine::Postgres => "postgres",
                Engine::MySQL => "mysql",
            };
            Err(Error::StrategyUnavailable {
                protocol: engine.as_str().to_string(),
                reason: format!("dbkeeper was built without the {} feature", feature),
            })
        }
    }
}
