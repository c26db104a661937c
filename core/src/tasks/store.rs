use super::{error::TaskError, request::TaskRequest};
use common::windows::RegisteredTask;

/// Access to the Task Scheduler. Tasks are kept in the root folder
pub trait TaskStore {
    /// Whether triggers and run level can be read back from the store
    fn supports_triggers(&self) -> bool;
    /// Get a registered Task by name. Returns `TaskError::NotFound` if there is no such Task
    fn query(&self, name: &str) -> Result<RegisteredTask, TaskError>;
    /// Issue a mutating call. Any non-success result is an error
    fn execute(&self, request: &TaskRequest) -> Result<(), TaskError>;
}

/// Tasks use a flat namespace under the root folder
pub fn task_path(name: &str) -> String {
    format!("\\{name}")
}
