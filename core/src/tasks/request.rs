use super::{command::task_run_option, error::TaskError, frequency::schedule_option};
use common::windows::{DesiredTaskSpec, Frequency, RunLevel};
use log::error;

/// Run-as identity. User and password are always provided together
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Pull the user and password pair from a spec. Providing only one of them is an error
    pub fn from_spec(spec: &DesiredTaskSpec) -> Result<Option<Credentials>, TaskError> {
        match (&spec.user, &spec.password) {
            (Some(user), Some(password)) => {
                check_value(&spec.name, "user", user)?;
                check_value(&spec.name, "password", password)?;
                Ok(Some(Credentials {
                    user: user.clone(),
                    password: password.clone(),
                }))
            }
            (None, None) => Ok(None),
            _ => {
                error!(
                    "[tasks] {}: Can't specify user or password without both!",
                    spec.name
                );
                Err(TaskError::CredentialPair)
            }
        }
    }
}

/// Task name to place in `/TN`. Double quotes would end the quoted value early
pub fn task_name(name: &str) -> Result<String, TaskError> {
    check_value(name, "name", name)?;
    Ok(name.to_string())
}

/// Values are wrapped in double quotes on the schtasks command line and cannot contain one
pub(crate) fn check_value(task: &str, field: &str, value: &str) -> Result<(), TaskError> {
    if value.contains('"') {
        error!("[tasks] {task}: {field} can't contain a double quote");
        return Err(TaskError::QuotedValue);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub name: String,
    pub frequency: Frequency,
    pub modifier: u32,
    pub start_day: Option<String>,
    pub start_time: Option<String>,
    /**Full command line. Split and re-quoted when rendered */
    pub command: Option<String>,
    pub credentials: Option<Credentials>,
    pub run_level: RunLevel,
    /**Overwrite an existing Task */
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRequest {
    pub name: String,
    pub command: Option<String>,
    pub credentials: Option<Credentials>,
}

/// Mutating calls against the Task Scheduler
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRequest {
    Create(CreateRequest),
    Change(ChangeRequest),
    Run { name: String },
    Delete { name: String, force: bool },
}

impl TaskRequest {
    pub fn name(&self) -> &str {
        match self {
            TaskRequest::Create(create) => &create.name,
            TaskRequest::Change(change) => &change.name,
            TaskRequest::Run { name } | TaskRequest::Delete { name, .. } => name,
        }
    }

    /// Arguments for schtasks.exe
    pub fn command_line(&self) -> String {
        self.render(false)
    }

    /// Same as `command_line` with the password hidden. Use this for logging
    pub fn redacted(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact: bool) -> String {
        let mut options = Vec::new();
        match self {
            TaskRequest::Create(create) => {
                options.push(String::from("/Create"));
                if create.force {
                    options.push(String::from("/F"));
                }
                options.push(format!("/TN \"{}\"", create.name));
                options.push(schedule_option(&create.frequency, create.modifier));
                if let Some(day) = &create.start_day {
                    options.push(format!("/SD \"{day}\""));
                }
                if let Some(time) = &create.start_time {
                    options.push(format!("/ST \"{time}\""));
                }
                options.push(task_run_option(
                    create.command.as_deref().unwrap_or_default(),
                ));
                if let Some(credentials) = &create.credentials {
                    options.push(credentials_option(credentials, redact));
                }
                if create.run_level == RunLevel::Highest {
                    options.push(String::from("/RL HIGHEST"));
                }
            }
            TaskRequest::Change(change) => {
                options.push(String::from("/Change"));
                options.push(format!("/TN \"{}\"", change.name));
                if let Some(command) = &change.command {
                    options.push(task_run_option(command));
                }
                if let Some(credentials) = &change.credentials {
                    options.push(credentials_option(credentials, redact));
                }
            }
            TaskRequest::Run { name } => {
                options.push(String::from("/Run"));
                options.push(format!("/TN \"{name}\""));
            }
            TaskRequest::Delete { name, force } => {
                options.push(String::from("/Delete"));
                if *force {
                    options.push(String::from("/F"));
                }
                options.push(format!("/TN \"{name}\""));
            }
        }
        options.join(" ")
    }
}

fn credentials_option(credentials: &Credentials, redact: bool) -> String {
    let password = if redact {
        "*****"
    } else {
        credentials.password.as_str()
    };
    format!("/RU \"{}\" /RP \"{password}\"", credentials.user)
}

#[cfg(test)]
mod tests {
    use super::{check_value, task_name, ChangeRequest, CreateRequest, Credentials, TaskRequest};
    use crate::tasks::error::TaskError;
    use common::windows::{DesiredTaskSpec, Frequency, RunLevel};

    fn create_request() -> CreateRequest {
        CreateRequest {
            name: String::from("nightly-backup"),
            frequency: Frequency::Daily,
            modifier: 2,
            start_day: None,
            start_time: None,
            command: Some(String::from(r#""C:\backup.exe" --full"#)),
            credentials: None,
            run_level: RunLevel::Limited,
            force: false,
        }
    }

    #[test]
    fn test_create_command_line() {
        let request = TaskRequest::Create(create_request());
        assert_eq!(
            request.command_line(),
            r#"/Create /TN "nightly-backup" /SC DAILY /MO 2 /TR "\"C:\backup.exe\" --full""#
        );
    }

    #[test]
    fn test_create_command_line_all_options() {
        let mut create = create_request();
        create.force = true;
        create.frequency = Frequency::OnLogon;
        create.start_day = Some(String::from("01/02/2025"));
        create.start_time = Some(String::from("02:30"));
        create.command = Some(String::from("notepad.exe"));
        create.credentials = Some(Credentials {
            user: String::from("SYSTEM"),
            password: String::from("secret"),
        });
        create.run_level = RunLevel::Highest;

        let request = TaskRequest::Create(create);
        assert_eq!(
            request.command_line(),
            r#"/Create /F /TN "nightly-backup" /SC ONLOGON /SD "01/02/2025" /ST "02:30" /TR "notepad.exe" /RU "SYSTEM" /RP "secret" /RL HIGHEST"#
        );
        assert!(!request.redacted().contains("secret"));
        assert!(request.redacted().contains(r#"/RP "*****""#));
    }

    #[test]
    fn test_create_command_line_no_command() {
        let mut create = create_request();
        create.command = None;
        let request = TaskRequest::Create(create);
        assert!(request.command_line().ends_with(r#"/TR """#));
    }

    #[test]
    fn test_change_command_line() {
        let request = TaskRequest::Change(ChangeRequest {
            name: String::from("poll"),
            command: Some(String::from("cmd.exe /c dir")),
            credentials: None,
        });
        assert_eq!(
            request.command_line(),
            r#"/Change /TN "poll" /TR "\"cmd.exe\" /c dir""#
        );
        assert_eq!(request.name(), "poll");
    }

    #[test]
    fn test_run_delete_command_line() {
        let request = TaskRequest::Run {
            name: String::from("poll"),
        };
        assert_eq!(request.command_line(), r#"/Run /TN "poll""#);

        let request = TaskRequest::Delete {
            name: String::from("poll"),
            force: true,
        };
        assert_eq!(request.command_line(), r#"/Delete /F /TN "poll""#);

        let request = TaskRequest::Delete {
            name: String::from("poll"),
            force: false,
        };
        assert_eq!(request.command_line(), r#"/Delete /TN "poll""#);
    }

    #[test]
    fn test_credentials_from_spec() {
        let mut spec = DesiredTaskSpec::new("task");
        assert_eq!(Credentials::from_spec(&spec), Ok(None));

        spec.user = Some(String::from("bob"));
        assert_eq!(
            Credentials::from_spec(&spec),
            Err(TaskError::CredentialPair)
        );

        spec.password = Some(String::from("hunter2"));
        assert_eq!(
            Credentials::from_spec(&spec).unwrap().unwrap().user,
            "bob"
        );

        spec.user = None;
        assert_eq!(
            Credentials::from_spec(&spec),
            Err(TaskError::CredentialPair)
        );
    }

    #[test]
    fn test_credentials_quoted() {
        let mut spec = DesiredTaskSpec::new("task");
        spec.user = Some(String::from(r#"bob" /RU "SYSTEM"#));
        spec.password = Some(String::from("hunter2"));
        assert_eq!(Credentials::from_spec(&spec), Err(TaskError::QuotedValue));

        spec.user = Some(String::from("bob"));
        spec.password = Some(String::from(r#"pass"word"#));
        assert_eq!(Credentials::from_spec(&spec), Err(TaskError::QuotedValue));
    }

    #[test]
    fn test_task_name() {
        assert_eq!(task_name("poll"), Ok(String::from("poll")));
        assert_eq!(
            task_name(r#"a" /TN "other"#),
            Err(TaskError::QuotedValue)
        );
    }

    #[test]
    fn test_check_value() {
        assert_eq!(check_value("task", "start_time", "02:30"), Ok(()));
        assert_eq!(
            check_value("task", "start_day", r#"01/02" /F"#),
            Err(TaskError::QuotedValue)
        );
    }
}
