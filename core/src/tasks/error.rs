use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TaskError {
    /**Task is not registered. Callers treat this as an absent Task */
    NotFound,
    /**Only one of user or password was provided */
    CredentialPair,
    /**Value contains a double quote and cannot be passed to schtasks */
    QuotedValue,
    /**schtasks returned a non-zero exit code */
    OsCall,
    /**Could not spawn the Task Scheduler tooling */
    Execute,
    ReadXml,
    /**Task Scheduler is only available on Windows */
    Platform,
}

impl std::error::Error for TaskError {}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::NotFound => write!(f, "Schedule Task not found"),
            TaskError::CredentialPair => {
                write!(f, "Can't specify user or password without both")
            }
            TaskError::QuotedValue => write!(f, "Value contains a double quote"),
            TaskError::OsCall => write!(f, "Schedule Task command failed"),
            TaskError::Execute => write!(f, "Could not execute schtasks"),
            TaskError::ReadXml => write!(f, "Failed to read Schedule Task XML"),
            TaskError::Platform => write!(f, "Schedule Tasks are only supported on Windows"),
        }
    }
}
