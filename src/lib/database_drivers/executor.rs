use super::Credentials;
use async_trait::async_trait;

/// Runs a single statement on a fresh connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    // the connection is closed before returning, whatever the outcome
    async fn execute(
        &self,
        url: &str,
        credentials: &Credentials,
        sql: &str,
    ) -> Result<(), sqlx::Error>;
}

#[cfg(feature = "postgres")]
pub use self::postgres::PgExecutor;

#[cfg(feature = "mysql")]
pub use self::mysql::MySqlExecutor;

#[cfg(feature = "postgres")]
mod postgres {
    use super::SqlExecutor;
    use crate::database_drivers::Credentials;
    use async_trait::async_trait;
    use log::warn;
    use sqlx::postgres::PgConnectOptions;
    use sqlx::{ConnectOptions, Connection, Executor};
    use std::str::FromStr;

    pub struct PgExecutor;

    /// Options for `url`, where non empty credentials replace the url's userinfo.
    fn connect_options(
        url: &str,
        credentials: &Credentials,
    ) -> Result<PgConnectOptions, sqlx::Error> {
        let mut options = PgConnectOptions::from_str(url)?;
        if !credentials.username.is_empty() {
            options = options.username(&credentials.username);
        }
        if !credentials.password.is_empty() {
            options = options.password(&credentials.password);
        }
        Ok(options)
    }

    #[async_trait]
    impl SqlExecutor for PgExecutor {
        async fn execute(
            &self,
            url: &str,
            credentials: &Credentials,
            sql: &str,
        ) -> Result<(), sqlx::Error> {
            let mut conn = connect_options(url, credentials)?.connect().await?;
            let result = conn.execute(sql).await;

            if let Err(e) = conn.close().await {
                warn!("Error closing connection: {}", e);
            }

            result.map(|_| ())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_empty_credentials_keep_url_userinfo() {
            let options = connect_options(
                "postgresql://admin@localhost/postgres",
                &Credentials::new("", ""),
            )
            .unwrap();
            assert_eq!(options.get_username(), "admin");
        }

        #[test]
        fn test_credentials_replace_url_userinfo() {
            let options = connect_options(
                "postgresql://admin@localhost/postgres",
                &Credentials::new("builder", "hunter2"),
            )
            .unwrap();
            assert_eq!(options.get_username(), "builder");
        }
    }
}

#[cfg(feature = "mysql")]
mod mysql {
    use super::SqlExecutor;
    use crate::database_drivers::Credentials;
    use async_trait::async_trait;
    use log::warn;
    use sqlx::mysql::MySqlConnectOptions;
    use sqlx::{ConnectOptions, Connection, Executor};
    use std::str::FromStr;

    pub struct MySqlExecutor;

    /// Options for `url`, where non empty credentials replace the url's userinfo.
    fn connect_options(
        url: &str,
        credentials: &Credentials,
    ) -> Result<MySqlConnectOptions, sqlx::Error> {
        let mut options = MySqlConnectOptions::from_str(url)?;
        if !credentials.username.is_empty() {
            options = options.username(&credentials.username);
        }
        if !credentials.password.is_empty() {
            options = options.password(&credentials.password);
        }
        Ok(options)
    }

    #[async_trait]
    impl SqlExecutor for MySqlExecutor {
        async fn execute(
            &self,
            url: &str,
            credentials: &Credentials,
            sql: &str,
        ) -> Result<(), sqlx::Error> {
            let mut conn = connect_options(url, credentials)?.connect().await?;
            let result = conn.execute(sql).await;

            if let Err(e) = conn.close().await {
                warn!("Error closing connection: {}", e);
            }

            result.map(|_| ())
        }
    }

}
