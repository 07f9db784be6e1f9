use crate::error::{Error, Result};
use log::debug;
use std::ffi::OsString;
use std::io;
use tokio::process::Command;

/// Command line for an external dump tool.
#[derive(Clone, PartialEq, Eq)]
pub struct DumpCommand {
    pub program: String,
    /// Kept as `OsString` so non UTF-8 paths reach the tool unchanged
    pub args: Vec<OsString>,
    /// Extra environment for the child. This is where secrets go, never `args`.
    pub envs: Vec<(String, String)>,
}

impl std::fmt::Debug for DumpCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_keys: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("DumpCommand")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("envs", &env_keys)
            .finish()
    }
}

impl DumpCommand {
    pub fn new(program: &str) -> Self {
        DumpCommand {
            program: program.to_string(),
            args: vec![],
            envs: vec![],
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }
}

/// Runs `cmd` to completion. Both output streams are captured and only
/// surfaced when the tool exits with a non zero status.
pub async fn run(cmd: &DumpCommand) -> Result<()> {
    let launch_err = |source| Error::LaunchFailed {
        program: cmd.program.clone(),
        source,
    };

    if which::which(&cmd.program).is_err() {
        return Err(launch_err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found in PATH, is it installed?", cmd.program),
        )));
    }

    debug!("Running {:?}", cmd);

    let output = Command::new(&cmd.program)
        .args(&cmd.args)
        .envs(cmd.envs.iter().map(|(k, v)| (k, v)))
        .output()
        .await
        .map_err(launch_err)?;

    if !output.status.success() {
        return Err(Error::DumpFailed {
            program: cmd.program.clone(),
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}
