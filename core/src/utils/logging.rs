use super::error::UtilError;
use crate::structs::toml::Output;
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};
use uuid::Uuid;

/// Create log output file and logging level based on TOML `Output` configuration
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), UtilError> {
    let path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[core] Failed to create logging output directory for {path}. Error: {err:?}");
            return Err(UtilError::CreateDirectory);
        }
    }

    let output_result = File::create(format!("{path}/{}.log", Uuid::new_v4().hyphenated()));
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to create log file at {path}. Error: {err:?}");
            return Err(UtilError::LogFile);
        }
    };

    Ok((log_file, log_level(&output.logging)))
}

/// Map the configured level name to a `LevelFilter`. Unknown names fall back to warn
pub(crate) fn log_level(level: &Option<String>) -> LevelFilter {
    if let Some(log_level) = level {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}
