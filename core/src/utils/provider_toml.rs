use super::error::UtilError;
use crate::structs::toml::ProviderToml;
use log::error;
use std::str::from_utf8;

impl ProviderToml {
    /// Parse the winsched TOML file
    pub(crate) fn parse_provider_toml(toml_data: &[u8]) -> Result<ProviderToml, UtilError> {
        let toml_results = toml::from_str(from_utf8(toml_data).unwrap_or_default());
        let mut provider: ProviderToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[core] Failed to parse TOML data. Error: {err:?}");
                return Err(UtilError::BadToml);
            }
        };

        // Level is always lowercase
        if let Some(level) = provider.output.logging.as_mut() {
            *level = level.to_lowercase();
        }
        Ok(provider)
    }
}
