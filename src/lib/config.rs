use crate::error::{Error, Result};

/// Prefix every connection url handed to dbkeeper must carry.
pub const JDBC_PREFIX: &str = "jdbc:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Postgres,
    MySQL,
}

impl Engine {
    pub fn new(protocol: &str) -> Result<Engine> {
        match protocol {
            "postgresql" => Ok(Engine::Postgres),
            "mysql" => Ok(Engine::MySQL),
            _ => Err(Error::UnsupportedProtocol(protocol.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Postgres => "postgresql",
            Engine::MySQL => "mysql",
        }
    }

    // the database that always exists on a fresh server
    pub fn bootstrap_database(&self) -> &'static str {
        match self {
            Engine::Postgres => "postgres",
            Engine::MySQL => "mysql",
        }
    }

    pub fn dump_command(&self) -> &'static str {
        match self {
            Engine::Postgres => "pg_dump",
            Engine::MySQL => "mysqldump",
        }
    }

    pub fn password_env(&self) -> &'static str {
        match self {
            Engine::Postgres => "PGPASSWORD",
            Engine::MySQL => "MYSQL_PWD",
        }
    }
}
