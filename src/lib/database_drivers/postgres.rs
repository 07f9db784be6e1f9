use crate::config::Engine;
use crate::database_drivers::command::{self, DumpCommand};
use crate::database_drivers::executor::{PgExecutor, SqlExecutor};
use crate::database_drivers::{ConnectionTarget, Credentials, DatabaseDriver, DumpRequest};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;

pub struct PostgresDriver {
    executor: Box<dyn SqlExecutor>,
}

impl PostgresDriver {
    pub fn new() -> PostgresDriver {
        PostgresDriver::with_executor(Box::new(PgExecutor))
    }

    pub fn with_executor(executor: Box<dyn SqlExecutor>) -> PostgresDriver {
        PostgresDriver { executor }
    }

    pub fn dump_command(request: &DumpRequest) -> DumpCommand {
        let engine = Engine::Postgres;
        let target = &request.target;

        let mut cmd = DumpCommand::new(engine.dump_command())
            .arg("-h")
            .arg(&target.host);
        if let Some(port) = target.port {
            cmd = cmd.arg("-p").arg(port.to_string());
        }

        cmd.arg("-U")
            .arg(&request.credentials.username)
            .arg("-f")
            .arg(&request.output)
            // --clean together with --create emits the DROP DATABASE statement
            .arg("--clean")
            .arg("--create")
            .arg(&target.database_name)
            .env(engine.password_env(), &request.credentials.password)
    }
}

impl Default for PostgresDriver {
    fn default() -> Self {
        PostgresDriver::new()
    }
}

#[async_trait]
impl DatabaseDriver for PostgresDriver {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }

    async fn create_database(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
    ) -> Result<()> {
        let query = format!("CREATE DATABASE \"{}\"", target.database_name);
        debug!("Running `{}` against {}", query, target.display_url());

        self.executor
            .execute(target.connection_url(), credentials, &query)
            .await
            .map_err(|source| Error::DbOperationFailed {
                operation: "create",
                source,
            })
    }

    async fn drop_database(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
    ) -> Result<()> {
        let query = format!("DROP DATABASE IF EXISTS \"{}\"", target.database_name);
        debug!("Running `{}` against {}", query, target.display_url());

        self.executor
            .execute(target.connection_url(), credentials, &query)
            .await
            .map_err(|source| Error::DbOperationFailed {
                operation: "drop",
                source,
            })
    }

    async fn dump_database(&self, request: &DumpRequest) -> Result<()> {
        command::run(&PostgresDriver::dump_command(request)).await
    }
}
