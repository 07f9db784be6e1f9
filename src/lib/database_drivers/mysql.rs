use crate::config::Engine;
use crate::database_drivers::command::{self, DumpCommand};
use crate::database_drivers::executor::{MySqlExecutor, SqlExecutor};
use crate::database_drivers::{ConnectionTarget, Credentials, DatabaseDriver, DumpRequest};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use std::ffi::OsString;

pub struct MySQLDriver {
    executor: Box<dyn SqlExecutor>,
}

impl MySQLDriver {
    pub fn new() -> MySQLDriver {
        MySQLDriver::with_executor(Box::new(MySqlExecutor))
    }

    pub fn with_executor(executor: Box<dyn SqlExecutor>) -> MySQLDriver {
        MySQLDriver { executor }
    }

    pub fn dump_command(request: &DumpRequest) -> DumpCommand {
        let engine = Engine::MySQL;
        let target = &request.target;

        let mut cmd = DumpCommand::new(engine.dump_command())
            .arg("-h")
            .arg(&target.host);
        // -p is the password flag for mysqldump, the port is -P
        if let Some(port) = target.port {
            cmd = cmd.arg("-P").arg(port.to_string());
        }

        let mut result_file = OsString::from("--result-file=");
        result_file.push(&request.output);

        cmd.arg("-u")
            .arg(&request.credentials.username)
            .arg(result_file)
            .arg("--add-drop-database")
            .arg("--databases")
            .arg(&target.database_name)
            .env(engine.password_env(), &request.credentials.password)
    }
}

impl Default for MySQLDriver {
    fn default() -> Self {
        MySQLDriver::new()
    }
}

#[async_trait]
impl DatabaseDriver for MySQLDriver {
    fn engine(&self) -> Engine {
        Engine::MySQL
    }

    async fn create_database(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
    ) -> Result<()> {
        // unquoted, unlike the PostgreSQL driver
        let query = format!("CREATE DATABASE {}", target.database_name);
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
        let query = format!("DROP DATABASE IF EXISTS {}", target.database_name);
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
        command::run(&MySQLDriver::dump_command(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_drivers::executor::MockSqlExecutor;
    use crate::database_drivers::target;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn connection_target(url: &str) -> ConnectionTarget {
        target::parse(&url::Url::parse(url).unwrap(), "mysql").unwrap()
    }

    fn request(url: &str) -> DumpRequest {
        DumpRequest {
            target: connection_target(url),
            credentials: Credentials::new("root", "hunter2"),
            output: PathBuf::from("/tmp/out/dump.sql"),
        }
    }

    // PostgreSQL quotes the identifier, MySQL does not. Pinned until the
    // asymmetry is settled one way or the other.
    #[tokio::test]
    async fn test_create_database_does_not_quote_identifier() {
        let mut executor = MockSqlExecutor::new();
        executor
            .expect_execute()
            .withf(|url, credentials, sql| {
                url == "mysql://localhost:3306/mysql"
                    && credentials.username == "root"
                    && sql == "CREATE DATABASE app_test"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let driver = MySQLDriver::with_executor(Box::new(executor));
        let result = driver
            .create_database(
                &connection_target("mysql://localhost:3306/app_test"),
                &Credentials::new("root", "hunter2"),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_drop_database_is_idempotent_statement() {
        let mut executor = MockSqlExecutor::new();
        executor
            .expect_execute()
            .withf(|url, _, sql| {
                url == "mysql://localhost/mysql" && sql == "DROP DATABASE IF EXISTS missing_db"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let driver = MySQLDriver::with_executor(Box::new(executor));
        let result = driver
            .drop_database(
                &connection_target("mysql://localhost/missing_db"),
                &Credentials::new("root", "hunter2"),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_drop_database_propagates_driver_error() {
        let mut executor = MockSqlExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_, _, _| Err(sqlx::Error::PoolTimedOut));

        let driver = MySQLDriver::with_executor(Box::new(executor));
        let err = driver
            .drop_database(
                &connection_target("mysql://localhost/app"),
                &Credentials::new("root", "hunter2"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DbOperationFailed);
        assert!(err.to_string().starts_with("cannot drop the db"));
    }

    #[test]
    fn test_dump_command_with_port() {
        let cmd = MySQLDriver::dump_command(&request("mysql://db.internal:7777/app"));

        assert_eq!(cmd.program, "mysqldump");
        assert_eq!(
            cmd.args,
            vec![
                "-h",
                "db.internal",
                "-P",
                "7777",
                "-u",
                "root",
                "--result-file=/tmp/out/dump.sql",
                "--add-drop-database",
                "--databases",
                "app",
            ]
        );
        assert_eq!(
            cmd.envs,
            vec![("MYSQL_PWD".to_string(), "hunter2".to_string())]
        );
    }

    #[test]
    fn test_dump_command_without_port() {
        let cmd = MySQLDriver::dump_command(&request("mysql://localhost/app"));
        assert!(!cmd.args.iter().any(|a| a == "-P"));
        assert!(cmd
            .args
            .iter()
            .all(|a| !a.to_string_lossy().contains("hunter2")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dump_command_keeps_non_utf8_output_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut request = request("mysql://localhost/app");
        request.output = PathBuf::from(OsStr::from_bytes(b"/tmp/out/\xffdump.sql"));

        let cmd = MySQLDriver::dump_command(&request);
        assert!(cmd
            .args
            .iter()
            .any(|a| a.as_bytes() == b"--result-file=/tmp/out/\xffdump.sql"));
    }
}
