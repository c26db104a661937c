use serde::{Deserialize, Serialize};

/**
 * Desired state of a single Schedule Task.
 * Supplied once per reconciliation by the caller
 */
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DesiredTaskSpec {
    /**Task name. Tasks live in the root folder, so the OS path is `\name` */
    pub name: String,
    pub command: Option<String>,
    pub cwd: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
    /**Meaning depends on `frequency`. Minutes, hours, days, weeks or months */
    #[serde(default = "default_modifier")]
    pub frequency_modifier: u32,
    pub start_day: Option<String>,
    pub start_time: Option<String>,
    #[serde(default)]
    pub run_level: RunLevel,
    /**Allow overwriting an existing Task on create and skip confirmation on delete */
    #[serde(default)]
    pub force: bool,
}

fn default_frequency() -> Frequency {
    Frequency::Hourly
}

fn default_modifier() -> u32 {
    1
}

impl DesiredTaskSpec {
    /// Build a spec with only a name. Everything else uses the resource defaults
    pub fn new(name: &str) -> DesiredTaskSpec {
        DesiredTaskSpec {
            name: name.to_string(),
            command: None,
            cwd: None,
            user: None,
            password: None,
            frequency: default_frequency(),
            frequency_modifier: default_modifier(),
            start_day: None,
            start_time: None,
            run_level: RunLevel::default(),
            force: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Minute,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    OnIdle,
    OnStart,
    OnLogon,
}

impl Frequency {
    /// Frequencies that take a `/MO` modifier
    pub fn has_modifier(&self) -> bool {
        matches!(
            self,
            Frequency::Minute
                | Frequency::Hourly
                | Frequency::Daily
                | Frequency::Weekly
                | Frequency::Monthly
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLevel {
    #[default]
    Limited,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Unknown,
    Disabled,
    Queued,
    Ready,
    Running,
}

/// Reconciliation actions a caller can request for a Task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Create,
    Run,
    Change,
    Delete,
    Query,
}

/**
 * Normalized view of a Task registered on the system.
 * Rebuilt on every reconciliation. When `exists` is false all other fields are `None`
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentTaskSnapshot {
    pub exists: bool,
    pub status: Option<TaskStatus>,
    pub command: Option<String>,
    pub cwd: Option<String>,
    pub user: Option<String>,
    pub run_level: Option<RunLevel>,
    pub frequency: Option<Frequency>,
    pub frequency_modifier: Option<u32>,
}

impl CurrentTaskSnapshot {
    /// Snapshot for a Task that is not registered
    pub fn absent() -> CurrentTaskSnapshot {
        CurrentTaskSnapshot {
            exists: false,
            status: None,
            command: None,
            cwd: None,
            user: None,
            run_level: None,
            frequency: None,
            frequency_modifier: None,
        }
    }
}

/// Result of reconciling one Task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOutcome {
    pub name: String,
    pub action: TaskAction,
    pub changed: bool,
}

/**
 * A Task as returned by the Task Scheduler service.
 * Schema at: [Task XML](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-tsch/0d6383e4-de92-43e7-b0bb-a60cfa36379f)
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredTask {
    pub path: String,
    /**Raw `TASK_STATE` value. 0-4 are defined */
    pub state: u32,
    pub definition: TaskDefinition,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskDefinition {
    /**Actions in document order */
    pub actions: Vec<ActionDefinition>,
    /**Triggers in document order */
    pub triggers: Vec<TaskTrigger>,
    pub principal: Option<TaskPrincipal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActionDefinition {
    Exec(ExecAction),
    ComHandler { class_id: String },
    SendEmail,
    ShowMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecAction {
    pub path: String,
    pub arguments: Option<String>,
    pub working_directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPrincipal {
    pub user_id: Option<String>,
    /**`TASK_RUNLEVEL` value. 0 is LeastPrivilege, 1 is HighestAvailable */
    pub run_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TaskTrigger {
    /**One time trigger. `interval` is the repetition interval, ex: PT15M */
    Time { interval: Option<String> },
    Daily { days_interval: u32 },
    Weekly { weeks_interval: u32 },
    /**Bit 0 is January */
    Monthly { months: u16 },
    MonthlyDayOfWeek { months: u16 },
    Idle,
    Boot,
    Logon,
    Event,
    Registration,
    SessionStateChange,
    /**Custom triggers. Ex: WnfStateChangeTrigger */
    Custom,
}
