use super::{
    command::split_command,
    error::TaskError,
    frequency::encode_trigger,
    request::{ChangeRequest, CreateRequest, TaskRequest},
    store::{task_path, TaskStore},
};
use common::windows::{
    ActionDefinition, ExecAction, RegisteredTask, RunLevel, TaskDefinition, TaskPrincipal,
};
use log::debug;
use std::{cell::RefCell, collections::HashMap};

/// `TASK_STATE_READY`
const STATE_READY: u32 = 3;
/// `TASK_STATE_RUNNING`
const STATE_RUNNING: u32 = 4;

/**
 * In-memory Task Scheduler.
 * Applies requests the way schtasks would and records every request it receives
 */
pub struct MemoryStore {
    tasks: RefCell<HashMap<String, RegisteredTask>>,
    requests: RefCell<Vec<TaskRequest>>,
    supports_triggers: bool,
    fail_requests: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore {
            tasks: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            supports_triggers: true,
            fail_requests: false,
        }
    }

    /// Store that behaves like the legacy interface. Triggers are not readable
    pub fn legacy() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.supports_triggers = false;
        store
    }

    /// Every mutating request fails, as if schtasks returned a non-zero exit code
    pub fn failing(mut self) -> MemoryStore {
        self.fail_requests = true;
        self
    }

    /// Register a Task directly, bypassing requests
    pub fn insert(&self, name: &str, definition: TaskDefinition, state: u32) {
        let task = RegisteredTask {
            path: task_path(name),
            state,
            definition,
        };
        self.tasks.borrow_mut().insert(name.to_string(), task);
    }

    /// Change the state of a registered Task. Ex: a run that finished
    pub fn set_state(&self, name: &str, state: u32) {
        if let Some(task) = self.tasks.borrow_mut().get_mut(name) {
            task.state = state;
        }
    }

    /// Requests received so far, including failed ones
    pub fn requests(&self) -> Vec<TaskRequest> {
        self.requests.borrow().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.borrow().contains_key(name)
    }

    fn create(&self, create: &CreateRequest) -> Result<(), TaskError> {
        let mut tasks = self.tasks.borrow_mut();
        if tasks.contains_key(&create.name) && !create.force {
            debug!("[tasks] {} already exists and /F was not set", create.name);
            return Err(TaskError::OsCall);
        }

        let run_level = match create.run_level {
            RunLevel::Limited => 0,
            RunLevel::Highest => 1,
        };
        let definition = TaskDefinition {
            actions: vec![ActionDefinition::Exec(exec_action(
                create.command.as_deref().unwrap_or_default(),
            ))],
            triggers: vec![encode_trigger(&create.frequency, create.modifier)],
            principal: Some(TaskPrincipal {
                user_id: create.credentials.as_ref().map(|value| value.user.clone()),
                run_level: Some(run_level),
            }),
        };
        let task = RegisteredTask {
            path: task_path(&create.name),
            state: STATE_READY,
            definition,
        };
        tasks.insert(create.name.clone(), task);
        Ok(())
    }

    fn change(&self, change: &ChangeRequest) -> Result<(), TaskError> {
        let mut tasks = self.tasks.borrow_mut();
        let task = match tasks.get_mut(&change.name) {
            Some(result) => result,
            None => return Err(TaskError::OsCall),
        };

        if let Some(command) = &change.command {
            let position = task
                .definition
                .actions
                .iter()
                .position(|action| matches!(action, ActionDefinition::Exec(_)));
            let action = ActionDefinition::Exec(exec_action(command));
            match position {
                Some(index) => task.definition.actions[index] = action,
                None => task.definition.actions.push(action),
            }
        }

        if let Some(credentials) = &change.credentials {
            let principal = task.definition.principal.get_or_insert(TaskPrincipal {
                user_id: None,
                run_level: Some(0),
            });
            principal.user_id = Some(credentials.user.clone());
        }
        Ok(())
    }
}

/// Exec action as the Task Scheduler stores a `/TR` value
fn exec_action(command: &str) -> ExecAction {
    let (path, arguments) = split_command(command);
    ExecAction {
        path,
        arguments: if arguments.is_empty() {
            None
        } else {
            Some(arguments)
        },
        working_directory: None,
    }
}

impl TaskStore for MemoryStore {
    fn supports_triggers(&self) -> bool {
        self.supports_triggers
    }

    fn query(&self, name: &str) -> Result<RegisteredTask, TaskError> {
        match self.tasks.borrow().get(name) {
            Some(task) => Ok(task.clone()),
            None => Err(TaskError::NotFound),
        }
    }

    fn execute(&self, request: &TaskRequest) -> Result<(), TaskError> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail_requests {
            return Err(TaskError::OsCall);
        }

        match request {
            TaskRequest::Create(create) => self.create(create),
            TaskRequest::Change(change) => self.change(change),
            TaskRequest::Run { name } => match self.tasks.borrow_mut().get_mut(name) {
                Some(task) => {
                    task.state = STATE_RUNNING;
                    Ok(())
                }
                None => Err(TaskError::OsCall),
            },
            TaskRequest::Delete { name, .. } => match self.tasks.borrow_mut().remove(name) {
                Some(_) => Ok(()),
                None => Err(TaskError::OsCall),
            },
        }
    }
}
