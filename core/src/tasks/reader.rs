use super::{error::TaskError, frequency::decode_first, request::task_name, store::TaskStore};
use common::windows::{
    ActionDefinition, CurrentTaskSnapshot, RegisteredTask, RunLevel, TaskStatus,
};
use log::{debug, error, warn};

/// Index is the `TASK_STATE` value returned by the Task Scheduler
const TASK_STATES: [TaskStatus; 5] = [
    TaskStatus::Unknown,
    TaskStatus::Disabled,
    TaskStatus::Queued,
    TaskStatus::Ready,
    TaskStatus::Running,
];

/// Read the current state of a Task. A missing Task is not an error
pub fn read_task<S: TaskStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<CurrentTaskSnapshot, TaskError> {
    task_name(name)?;
    debug!("[tasks] Looking for existing task {name}");
    let task = match store.query(name) {
        Ok(result) => result,
        Err(TaskError::NotFound) => {
            debug!("[tasks] No task named {name}");
            return Ok(CurrentTaskSnapshot::absent());
        }
        Err(err) => {
            error!("[tasks] Could not query task {name}: {err:?}");
            return Err(err);
        }
    };

    Ok(snapshot(&task, store.supports_triggers()))
}

/// Normalize a registered Task. Only the first exec action and first trigger are used
pub(crate) fn snapshot(task: &RegisteredTask, supports_triggers: bool) -> CurrentTaskSnapshot {
    let mut current = CurrentTaskSnapshot::absent();
    current.exists = true;
    current.status = Some(task_status(task.state));

    let exec = task.definition.actions.iter().find_map(|action| match action {
        ActionDefinition::Exec(exec) => Some(exec),
        _ => None,
    });
    if let Some(exec) = exec {
        let command = format!(
            "{} {}",
            exec.path,
            exec.arguments.as_deref().unwrap_or_default()
        );
        current.command = Some(command.trim().to_string());
        current.cwd = exec.working_directory.clone();
    }

    if let Some(principal) = &task.definition.principal {
        current.user = principal.user_id.clone();
        if supports_triggers {
            current.run_level = principal.run_level.and_then(run_level);
        }
    }

    if supports_triggers {
        let (frequency, modifier) = decode_first(&task.definition.triggers);
        current.frequency = frequency;
        current.frequency_modifier = modifier;
    }

    current
}

fn task_status(state: u32) -> TaskStatus {
    match TASK_STATES.get(state as usize) {
        Some(status) => *status,
        None => {
            warn!("[tasks] Unexpected task state {state}");
            TaskStatus::Unknown
        }
    }
}

fn run_level(code: u32) -> Option<RunLevel> {
    match code {
        0 => Some(RunLevel::Limited),
        1 => Some(RunLevel::Highest),
        _ => None,
    }
}
