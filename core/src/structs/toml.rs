use crate::tasks::schtasks::TaskApi;
use common::windows::{DesiredTaskSpec, TaskAction};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProviderToml {
    pub output: Output,
    #[serde(default)]
    pub provider: ProviderOptions,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub name: String,
    pub directory: String,
    /**Log level. One of: error, warn, info, debug. Default is warn */
    pub logging: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderOptions {
    /**Which Task Scheduler interface to read Tasks with */
    #[serde(default)]
    pub api: TaskApi,
}

#[derive(Debug, Deserialize)]
pub struct TaskEntry {
    pub action: TaskAction,
    #[serde(flatten)]
    pub spec: DesiredTaskSpec,
}
