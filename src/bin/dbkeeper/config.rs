use anyhow::{bail, Result};
use std::env;

pub fn database_url() -> Result<String> {
    if let Ok(v) = env::var("DATABASE_URL") {
        if !v.is_empty() {
            return Ok(v);
        }
    }

    bail!("missing DATABASE_URL env variable")
}

pub fn database_username() -> String {
    env::var("DATABASE_USERNAME").unwrap_or_default()
}

pub fn database_password() -> String {
    env::var("DATABASE_PASSWORD").unwrap_or_default()
}

pub fn dump_file() -> String {
    if let Ok(v) = env::var("DATABASE_DUMP_FILE") {
        if !v.is_empty() {
            return v;
        }
    }

    "./dump.sql".to_string()
}

pub fn skip() -> bool {
    if let Ok(v) = env::var("DATABASE_SKIP") {
        if v == "true" {
            return true;
        }
    }

    false
}
