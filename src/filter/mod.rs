//! Running `date` and `awk` over log files.
//!
//! Both tools are located on `PATH` at call time. `date` turns the
//! configured date expressions into strings in the log's date format; `awk`
//! compares each line against them.

mod expand;
mod plan;

pub use expand::{expand_logfiles, expand_logfiles_with_home};
pub use plan::{Job, plan_jobs};

use crate::error::{ToolError, ToolResult};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Locate an executable on `PATH`.
pub fn find_tool(name: &str) -> ToolResult<PathBuf> {
    which::which(name).map_err(|source| ToolError::NotFound {
        name: name.to_string(),
        source,
    })
}

/// Evaluate `date` as `date --date <date> <datefmt>` and return its output.
pub fn datestr(date: &str, datefmt: &str) -> ToolResult<String> {
    let executable = find_tool("date")?;
    let mut command = Command::new(executable);
    command
        .arg("--date")
        .arg(date)
        .arg(datefmt)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit());
    debug!(?command, "running date");

    let output = command.output().map_err(|source| ToolError::Spawn {
        name: "date".to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(ToolError::Failed {
            name: "date".to_string(),
            status: output.status,
        });
    }
    let stdout = String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidOutput {
        name: "date".to_string(),
    })?;
    Ok(stdout.trim().to_string())
}

/// One `awk` run: `awk [-v var=value]... -- program [files...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwkInvocation {
    pub program: String,
    pub variables: Vec<(String, String)>,
    pub files: Vec<PathBuf>,
}

impl AwkInvocation {
    /// Arguments after the executable name.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.variables.len() * 2 + 2 + self.files.len());
        for (name, value) in &self.variables {
            args.push(OsString::from("-v"));
            args.push(OsString::from(format!("{}={}", name, value)));
        }
        args.push(OsString::from("--"));
        args.push(OsString::from(&self.program));
        args.extend(self.files.iter().map(|f| f.as_os_str().to_os_string()));
        args
    }

    /// Whether `other` would run the same program with the same variables.
    pub fn same_filter(&self, other: &AwkInvocation) -> bool {
        self.program == other.program && self.variables == other.variables
    }

    /// Run awk with output going straight to this process's stdout.
    pub fn run(&self) -> ToolResult<()> {
        let executable = find_tool("awk")?;
        self.run_with(&executable)
    }

    fn run_with(&self, executable: &Path) -> ToolResult<()> {
        let mut command = Command::new(executable);
        command.args(self.args()).stdin(Stdio::null());
        debug!(?command, "running awk");

        let status = command.status().map_err(|source| ToolError::Spawn {
            name: "awk".to_string(),
            source,
        })?;
        if !status.success() {
            return Err(ToolError::Failed {
                name: "awk".to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Run every job in order, writing headers to `out`.
///
/// `out` is flushed before each child starts so headers land ahead of the
/// child's output.
pub fn run_jobs<W: Write>(jobs: &[Job], out: &mut W) -> anyhow::Result<()> {
    for job in jobs {
        if let Some(header) = &job.header {
            writeln!(out)?;
            writeln!(out, "==> {} <==", header.display())?;
        }
        out.flush()?;
        job.awk.run()?;
    }
    Ok(())
}
