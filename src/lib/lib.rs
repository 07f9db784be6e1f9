mod config;
mod database_drivers;
mod dispatch;
mod dump;
mod error;
mod management;

use std::path::PathBuf;

pub use config::Engine;
pub use dispatch::Operation;
pub use error::{Error, ErrorKind, Result};

/// Create the database named by `database_url`,
/// e.g. `jdbc:postgresql://localhost:5432/app_test`.
pub async fn create_database(database_url: &str, username: &str, password: &str) -> Result<()> {
    dispatch::run(database_url, username, password, Operation::Create).await
}

/// Drop the database named by `database_url`. Dropping a database that does
/// not exist succeeds.
pub async fn drop_database(database_url: &str, username: &str, password: &str) -> Result<()> {
    dispatch::run(database_url, username, password, Operation::Drop).await
}

/// Dump the database named by `database_url` into `output` with the engine's
/// dump tool. Missing parent directories of `output` are created.
pub async fn dump_database(
    database_url: &str,
    username: &str,
    password: &str,
    output: impl Into<PathBuf>,
) -> Result<()> {
    let operation = Operation::Dump {
        output: output.into(),
    };
    dispatch::run(database_url, username, password, operation).await
}

/// Run `operation` against the database named by `database_url`. Empty
/// `username`/`password` fall back to the userinfo of the url.
pub async fn run(
    database_url: &str,
    username: &str,
    password: &str,
    operation: Operation,
) -> Result<()> {
    dispatch::run(database_url, username, password, operation).await
}
