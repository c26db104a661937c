use super::{
    error::TaskError,
    request::TaskRequest,
    store::{task_path, TaskStore},
    xml::parse_task_xml,
};
use crate::utils::{encoding::decode_xml, strings::extract_utf8_string};
use common::windows::RegisteredTask;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::process::{Command, Output};

/// Task Scheduler interface used to read Tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskApi {
    /**Task Scheduler 1.0. Triggers and run level are not read */
    V1,
    /**Task Scheduler 2.0 */
    #[default]
    V2,
}

/**
 * Task Scheduler backed by `schtasks.exe`.
 * Task definitions are read from the XML export, which is not localized unlike the list output
 */
pub struct SchtasksStore {
    api: TaskApi,
}

impl SchtasksStore {
    pub fn new(api: TaskApi) -> SchtasksStore {
        SchtasksStore { api }
    }
}

impl TaskStore for SchtasksStore {
    fn supports_triggers(&self) -> bool {
        self.api == TaskApi::V2
    }

    fn query(&self, name: &str) -> Result<RegisteredTask, TaskError> {
        let path = task_path(name);
        let output = run_schtasks(&format!("/Query /TN \"{path}\" /XML ONE"))?;
        if !output.status.success() {
            debug!(
                "[tasks] Could not query {path}: {}",
                extract_utf8_string(&output.stderr).trim()
            );
            return Err(TaskError::NotFound);
        }

        let xml = match decode_xml(&output.stdout) {
            Ok(result) => result,
            Err(err) => {
                error!("[tasks] Could not decode XML for {path}: {err:?}");
                return Err(TaskError::ReadXml);
            }
        };
        let definition = parse_task_xml(&xml)?;

        Ok(RegisteredTask {
            state: query_state(name),
            path,
            definition,
        })
    }

    fn execute(&self, request: &TaskRequest) -> Result<(), TaskError> {
        info!("[tasks] Executing schtasks {}", request.redacted());
        let output = run_schtasks(&request.command_line())?;
        if !output.status.success() {
            error!(
                "[tasks] schtasks failed for {}. {} exited with {:?}: {}",
                request.name(),
                request.redacted(),
                output.status.code(),
                extract_utf8_string(&output.stderr).trim()
            );
            return Err(TaskError::OsCall);
        }
        Ok(())
    }
}

/// Run schtasks.exe with an already quoted argument string
#[cfg(target_os = "windows")]
fn run_schtasks(arguments: &str) -> Result<Output, TaskError> {
    use std::os::windows::process::CommandExt;

    // Arguments carry their own quoting for the /TR option, pass them through untouched
    let result = Command::new("schtasks.exe").raw_arg(arguments).output();
    match result {
        Ok(output) => Ok(output),
        Err(err) => {
            error!("[tasks] Failed to execute schtasks: {err:?}");
            Err(TaskError::Execute)
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn run_schtasks(_arguments: &str) -> Result<Output, TaskError> {
    error!("[tasks] schtasks is only available on Windows");
    Err(TaskError::Platform)
}

/// Get the numeric `TASK_STATE` for a Task. Unknown (0) if it cannot be determined
fn query_state(name: &str) -> u32 {
    let script = state_script(name);
    let result = Command::new("powershell.exe")
        .args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()])
        .output();
    let output = match result {
        Ok(output) => output,
        Err(err) => {
            warn!("[tasks] Could not execute powershell to get state of {name}: {err:?}");
            return 0;
        }
    };

    parse_state(&extract_utf8_string(&output.stdout)).unwrap_or_else(|| {
        warn!("[tasks] Could not determine state of {name}");
        0
    })
}

/// PowerShell one-liner that prints the state of a root folder Task as a number.
/// `-TaskName` takes a wildcard pattern, so the name is compared exactly instead
fn state_script(name: &str) -> String {
    format!(
        "$task = Get-ScheduledTask -TaskPath '\\' -ErrorAction Stop | Where-Object TaskName -eq '{}' | Select-Object -First 1; if ($task) {{ [int]$task.State }}",
        name.replace('\'', "''")
    )
}

fn parse_state(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_state, state_script, SchtasksStore, TaskApi};
    use crate::tasks::store::TaskStore;

    #[test]
    fn test_supports_triggers() {
        assert!(SchtasksStore::new(TaskApi::V2).supports_triggers());
        assert!(!SchtasksStore::new(TaskApi::V1).supports_triggers());
    }

    #[test]
    fn test_state_script() {
        assert_eq!(
            state_script("bob's task"),
            r"$task = Get-ScheduledTask -TaskPath '\' -ErrorAction Stop | Where-Object TaskName -eq 'bob''s task' | Select-Object -First 1; if ($task) { [int]$task.State }"
        );
    }

    #[test]
    fn test_state_script_wildcards() {
        let script = state_script("backup[1]*?");
        assert!(script.contains("Where-Object TaskName -eq 'backup[1]*?'"));
        assert!(!script.contains("-TaskName"));
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(parse_state("4\r\n"), Some(4));
        assert_eq!(parse_state(""), None);
        assert_eq!(parse_state("Running"), None);
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_query_not_windows() {
        use crate::tasks::error::TaskError;

        let store = SchtasksStore::new(TaskApi::V2);
        assert_eq!(store.query("anything"), Err(TaskError::Platform));
    }

    #[test]
    #[cfg(target_os = "windows")]
    #[ignore = "Queries the local Task Scheduler"]
    fn test_query_missing_task() {
        use crate::tasks::error::TaskError;

        let store = SchtasksStore::new(TaskApi::V2);
        assert_eq!(
            store.query("winsched-task-that-does-not-exist"),
            Err(TaskError::NotFound)
        );
    }
}
