//! Turning per-file settings into awk invocations.

use super::AwkInvocation;
use crate::config::FilterSettings;
use crate::error::ToolResult;
use std::collections::HashMap;
use std::path::PathBuf;

/// A planned awk run, with the header to print before it in non-batch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub header: Option<PathBuf>,
    pub awk: AwkInvocation,
}

/// Plan the awk runs for `targets`.
///
/// `date` formats a date expression (`date`, `datefmt`); each distinct pair
/// is evaluated once. In batch mode consecutive files sharing a program and
/// variables are filtered by one awk run with no headers. Otherwise every
/// file gets its own run and header.
pub fn plan_jobs<D>(
    targets: Vec<(PathBuf, FilterSettings)>,
    batch: bool,
    mut date: D,
) -> ToolResult<Vec<Job>>
where
    D: FnMut(&str, &str) -> ToolResult<String>,
{
    let mut dates: HashMap<(String, String), String> = HashMap::new();
    let mut eval = |expr: &str, datefmt: &str| -> ToolResult<String> {
        let key = (expr.to_string(), datefmt.to_string());
        if let Some(value) = dates.get(&key) {
            return Ok(value.clone());
        }
        let value = date(expr, datefmt)?;
        dates.insert(key, value.clone());
        Ok(value)
    };

    let mut jobs: Vec<Job> = Vec::new();
    for (path, settings) in targets {
        let awk = AwkInvocation {
            program: settings.program.clone(),
            variables: vec![
                ("level".to_string(), settings.level.pattern()),
                ("after".to_string(), eval(&settings.after, &settings.datefmt)?),
                ("before".to_string(), eval(&settings.before, &settings.datefmt)?),
            ],
            files: vec![path.clone()],
        };

        if batch {
            if let Some(last) = jobs.last_mut()
                && last.awk.same_filter(&awk)
            {
                last.awk.files.push(path);
                continue;
            }
            jobs.push(Job { header: None, awk });
        } else {
            jobs.push(Job {
                header: Some(path),
                awk,
            });
        }
    }
    Ok(jobs)
}
