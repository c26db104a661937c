use std::fmt;

#[derive(Debug)]
pub enum UtilError {
    BadToml,
    CreateDirectory,
    LogFile,
    UtfType,
}

impl std::error::Error for UtilError {}

impl fmt::Display for UtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilError::BadToml => write!(f, "Failed to parse TOML data"),
            UtilError::CreateDirectory => write!(f, "Could not create directory(ies)"),
            UtilError::LogFile => write!(f, "Could not create log file"),
            UtilError::UtfType => write!(f, "Failed to determine UTF XML type"),
        }
    }
}
