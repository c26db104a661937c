use std::fmt;

#[derive(Debug)]
pub enum ProviderError {
    NoFile,
    BadToml,
    Reconcile,
    Query,
}

impl std::error::Error for ProviderError {}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NoFile => write!(f, "Failed to read TOML file"),
            ProviderError::BadToml => write!(f, "Failed to parse TOML data"),
            ProviderError::Reconcile => write!(f, "Failed to reconcile task"),
            ProviderError::Query => write!(f, "Failed to query task"),
        }
    }
}
