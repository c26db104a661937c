use super::{
    error::TaskError,
    reader::read_task,
    request::{check_value, task_name, ChangeRequest, CreateRequest, Credentials, TaskRequest},
    store::TaskStore,
};
use common::windows::{CurrentTaskSnapshot, DesiredTaskSpec, TaskAction, TaskStatus};
use log::{debug, info};

/// Read the current Task and apply the requested action. Returns true if the Task was changed
pub fn reconcile<S: TaskStore + ?Sized>(
    store: &S,
    spec: &DesiredTaskSpec,
    action: &TaskAction,
) -> Result<bool, TaskError> {
    let current = read_task(store, &spec.name)?;
    match action {
        TaskAction::Create => create(store, spec, &current),
        TaskAction::Run => run(store, spec, &current),
        TaskAction::Change => change(store, spec, &current),
        TaskAction::Delete => delete(store, spec, &current),
        TaskAction::Query => Ok(false),
    }
}

/// Register the Task unless it already exists
pub fn create<S: TaskStore + ?Sized>(
    store: &S,
    spec: &DesiredTaskSpec,
    current: &CurrentTaskSnapshot,
) -> Result<bool, TaskError> {
    if current.exists {
        info!("[tasks] {} task already exists - nothing to do", spec.name);
        return Ok(false);
    }

    for (field, value) in [("start_day", &spec.start_day), ("start_time", &spec.start_time)] {
        if let Some(value) = value {
            check_value(&spec.name, field, value)?;
        }
    }
    let request = TaskRequest::Create(CreateRequest {
        name: task_name(&spec.name)?,
        frequency: spec.frequency,
        modifier: spec.frequency_modifier,
        start_day: spec.start_day.clone(),
        start_time: spec.start_time.clone(),
        command: spec.command.clone(),
        credentials: Credentials::from_spec(spec)?,
        run_level: spec.run_level,
        force: spec.force,
    });
    store.execute(&request)?;
    info!("[tasks] {} task created", spec.name);
    Ok(true)
}

/// Start the Task now unless it is missing or already running
pub fn run<S: TaskStore + ?Sized>(
    store: &S,
    spec: &DesiredTaskSpec,
    current: &CurrentTaskSnapshot,
) -> Result<bool, TaskError> {
    if !current.exists {
        debug!("[tasks] {} task doesn't exist - nothing to do", spec.name);
        return Ok(false);
    }
    if current.status == Some(TaskStatus::Running) {
        info!(
            "[tasks] {} task is currently running, skipping run",
            spec.name
        );
        return Ok(false);
    }

    let request = TaskRequest::Run {
        name: task_name(&spec.name)?,
    };
    store.execute(&request)?;
    info!("[tasks] {} task ran", spec.name);
    Ok(true)
}

/// Update the command and run-as identity of an existing Task
pub fn change<S: TaskStore + ?Sized>(
    store: &S,
    spec: &DesiredTaskSpec,
    current: &CurrentTaskSnapshot,
) -> Result<bool, TaskError> {
    if !current.exists {
        debug!("[tasks] {} task doesn't exist - nothing to do", spec.name);
        return Ok(false);
    }

    let request = TaskRequest::Change(ChangeRequest {
        name: task_name(&spec.name)?,
        command: spec.command.clone(),
        credentials: Credentials::from_spec(spec)?,
    });
    store.execute(&request)?;
    info!("[tasks] {} task changed", spec.name);
    Ok(true)
}

/// Remove the Task if it exists
pub fn delete<S: TaskStore + ?Sized>(
    store: &S,
    spec: &DesiredTaskSpec,
    current: &CurrentTaskSnapshot,
) -> Result<bool, TaskError> {
    if !current.exists {
        debug!("[tasks] {} task doesn't exist - nothing to do", spec.name);
        return Ok(false);
    }

    let request = TaskRequest::Delete {
        name: task_name(&spec.name)?,
        force: spec.force,
    };
    store.execute(&request)?;
    info!("[tasks] {} task deleted", spec.name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{change, create, delete, reconcile, run};
    use crate::tasks::{
        error::TaskError, memory::MemoryStore, reader::read_task, request::TaskRequest,
        store::TaskStore,
    };
    use common::windows::{
        CurrentTaskSnapshot, DesiredTaskSpec, Frequency, RunLevel, TaskAction, TaskStatus,
    };

    fn backup_spec() -> DesiredTaskSpec {
        let mut spec = DesiredTaskSpec::new("backup");
        spec.command = Some(String::from(r#""C:\backup.exe" --full"#));
        spec.frequency = Frequency::Daily;
        spec.frequency_modifier = 2;
        spec
    }

    /// Snapshot with every field filled with something a diff would trip over
    fn running_snapshot() -> CurrentTaskSnapshot {
        CurrentTaskSnapshot {
            exists: true,
            status: Some(TaskStatus::Running),
            command: Some(String::from("other.exe")),
            cwd: None,
            user: Some(String::from("SYSTEM")),
            run_level: Some(RunLevel::Limited),
            frequency: Some(Frequency::Once),
            frequency_modifier: None,
        }
    }

    #[test]
    fn test_create() {
        let store = MemoryStore::new();
        let spec = backup_spec();

        assert!(reconcile(&store, &spec, &TaskAction::Create).unwrap());
        let current = read_task(&store, "backup").unwrap();
        assert_eq!(current.command.as_deref(), Some(r"C:\backup.exe --full"));
        assert_eq!(current.frequency, Some(Frequency::Daily));
        assert_eq!(current.frequency_modifier, Some(2));
        assert_eq!(current.status, Some(TaskStatus::Ready));
    }

    #[test]
    fn test_create_existing() {
        let store = MemoryStore::new();
        let spec = backup_spec();

        assert!(!create(&store, &spec, &running_snapshot()).unwrap());
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_create_existing_with_force() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.force = true;
        reconcile(&store, &spec, &TaskAction::Create).unwrap();

        // Existence still wins over force
        assert!(!reconcile(&store, &spec, &TaskAction::Create).unwrap());
        assert_eq!(store.requests().len(), 1);
    }

    #[test]
    fn test_create_user_without_password() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.user = Some(String::from("alice"));

        let result = reconcile(&store, &spec, &TaskAction::Create);
        assert_eq!(result, Err(TaskError::CredentialPair));
        // Aborts before any call to the Task Scheduler
        assert!(store.requests().is_empty());
        assert!(!store.contains("backup"));
    }

    #[test]
    fn test_create_password_without_user() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.password = Some(String::from("hunter2"));

        let result = create(&store, &spec, &CurrentTaskSnapshot::absent());
        assert_eq!(result, Err(TaskError::CredentialPair));
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_create_os_failure() {
        let store = MemoryStore::new().failing();
        let result = reconcile(&store, &backup_spec(), &TaskAction::Create);
        assert_eq!(result, Err(TaskError::OsCall));
    }

    #[test]
    fn test_create_request() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.user = Some(String::from("alice"));
        spec.password = Some(String::from("pw"));
        spec.run_level = RunLevel::Highest;
        spec.start_time = Some(String::from("02:30"));
        spec.force = true;

        create(&store, &spec, &CurrentTaskSnapshot::absent()).unwrap();
        let requests = store.requests();
        assert_eq!(
            requests[0].command_line(),
            r#"/Create /F /TN "backup" /SC DAILY /MO 2 /ST "02:30" /TR "\"C:\backup.exe\" --full" /RU "alice" /RP "pw" /RL HIGHEST"#
        );
    }

    #[test]
    fn test_run() {
        let store = MemoryStore::new();
        let spec = backup_spec();
        reconcile(&store, &spec, &TaskAction::Create).unwrap();

        assert!(reconcile(&store, &spec, &TaskAction::Run).unwrap());
        assert_eq!(
            store.requests().last(),
            Some(&TaskRequest::Run {
                name: String::from("backup")
            })
        );
        assert_eq!(
            read_task(&store, "backup").unwrap().status,
            Some(TaskStatus::Running)
        );
    }

    #[test]
    fn test_run_already_running() {
        let store = MemoryStore::new();
        assert!(!run(&store, &backup_spec(), &running_snapshot()).unwrap());
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_run_after_finish() {
        let store = MemoryStore::new();
        let spec = backup_spec();
        reconcile(&store, &spec, &TaskAction::Create).unwrap();
        reconcile(&store, &spec, &TaskAction::Run).unwrap();
        assert!(!reconcile(&store, &spec, &TaskAction::Run).unwrap());

        // Run completed outside of the provider
        store.set_state("backup", 3);
        assert!(reconcile(&store, &spec, &TaskAction::Run).unwrap());
        assert_eq!(store.requests().len(), 3);
    }

    #[test]
    fn test_change() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        reconcile(&store, &spec, &TaskAction::Create).unwrap();

        spec.command = Some(String::from("cmd.exe /c echo changed"));
        spec.user = Some(String::from("alice"));
        spec.password = Some(String::from("pw"));
        assert!(reconcile(&store, &spec, &TaskAction::Change).unwrap());

        let current = read_task(&store, "backup").unwrap();
        assert_eq!(current.command.as_deref(), Some("cmd.exe /c echo changed"));
        assert_eq!(current.user.as_deref(), Some("alice"));
        assert_eq!(
            store.requests()[1].redacted(),
            r#"/Change /TN "backup" /TR "\"cmd.exe\" /c echo changed" /RU "alice" /RP "*****""#
        );
    }

    #[test]
    fn test_change_credential_conflict() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.password = Some(String::from("pw"));

        let result = change(&store, &spec, &running_snapshot());
        assert_eq!(result, Err(TaskError::CredentialPair));
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.force = true;
        reconcile(&store, &spec, &TaskAction::Create).unwrap();

        assert!(reconcile(&store, &spec, &TaskAction::Delete).unwrap());
        assert!(!store.contains("backup"));
        assert_eq!(
            store.requests().last(),
            Some(&TaskRequest::Delete {
                name: String::from("backup"),
                force: true
            })
        );
        assert!(!reconcile(&store, &spec, &TaskAction::Delete).unwrap());
    }

    #[test]
    fn test_absent_task() {
        let store = MemoryStore::new();
        let spec = backup_spec();
        let absent = CurrentTaskSnapshot::absent();

        assert!(!run(&store, &spec, &absent).unwrap());
        assert!(!change(&store, &spec, &absent).unwrap());
        assert!(!delete(&store, &spec, &absent).unwrap());
        assert!(store.requests().is_empty());

        assert!(create(&store, &spec, &absent).unwrap());
        assert_eq!(store.requests().len(), 1);
    }

    #[test]
    fn test_quoted_name() {
        let store = MemoryStore::new();
        store.insert("other", Default::default(), 3);
        let mut spec = backup_spec();
        spec.name = String::from(r#"a" /TN "other"#);

        let result = reconcile(&store, &spec, &TaskAction::Delete);
        assert_eq!(result, Err(TaskError::QuotedValue));
        assert_eq!(
            delete(&store, &spec, &running_snapshot()),
            Err(TaskError::QuotedValue)
        );
        assert!(store.requests().is_empty());
        assert!(store.contains("other"));
    }

    #[test]
    fn test_create_quoted_start_time() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.start_time = Some(String::from(r#"02:30" /RL "HIGHEST"#));

        let result = create(&store, &spec, &CurrentTaskSnapshot::absent());
        assert_eq!(result, Err(TaskError::QuotedValue));
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_absent_task_credential_conflict_ignored() {
        let store = MemoryStore::new();
        let mut spec = backup_spec();
        spec.user = Some(String::from("alice"));

        // Nothing to change, so the credentials are never looked at
        assert!(!reconcile(&store, &spec, &TaskAction::Change).unwrap());
    }

    #[test]
    fn test_query() {
        let store = MemoryStore::new();
        reconcile(&store, &backup_spec(), &TaskAction::Create).unwrap();
        assert!(!reconcile(&store, &backup_spec(), &TaskAction::Query).unwrap());
        assert_eq!(store.requests().len(), 1);
    }

    #[test]
    fn test_reconcile_dyn_store() {
        let store: Box<dyn TaskStore> = Box::new(MemoryStore::new());
        assert!(reconcile(store.as_ref(), &backup_spec(), &TaskAction::Create).unwrap());
    }
}
