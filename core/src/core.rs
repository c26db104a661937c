use crate::{
    error::ProviderError,
    structs::toml::ProviderToml,
    tasks::{
        reader::read_task,
        reconcile::reconcile,
        schtasks::{SchtasksStore, TaskApi},
        store::TaskStore,
    },
    utils::logging::create_log_file,
};
use common::windows::{CurrentTaskSnapshot, TaskOutcome};
use log::{error, info, LevelFilter};
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::fs::read;

/// Parse a TOML file at provided path and converge every Task it lists
pub fn parse_toml_file(path: &str) -> Result<Vec<TaskOutcome>, ProviderError> {
    let buffer = match read(path) {
        Ok(results) => results,
        Err(err) => {
            error!("[core] Could not read TOML file {path}: {err:?}");
            return Err(ProviderError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file and converge every Task it lists
pub fn parse_toml_data(data: &[u8]) -> Result<Vec<TaskOutcome>, ProviderError> {
    let collection = match ProviderToml::parse_provider_toml(data) {
        Ok(results) => results,
        Err(_) => return Err(ProviderError::BadToml),
    };

    if let Ok((log_file, level)) = create_log_file(&collection.output) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
    }

    let store = SchtasksStore::new(collection.provider.api);
    converge(&collection, &store)
}

/// Reconcile each Task entry in order. Stops at the first Task that fails
pub fn converge<S: TaskStore + ?Sized>(
    collection: &ProviderToml,
    store: &S,
) -> Result<Vec<TaskOutcome>, ProviderError> {
    let mut outcomes = Vec::new();
    for entry in &collection.tasks {
        let changed = match reconcile(store, &entry.spec, &entry.action) {
            Ok(result) => result,
            Err(err) => {
                error!(
                    "[core] Failed to {:?} task {}: {err:?}",
                    entry.action, entry.spec.name
                );
                return Err(ProviderError::Reconcile);
            }
        };

        info!(
            "[core] {:?} {} finished. Changed: {changed}",
            entry.action, entry.spec.name
        );
        outcomes.push(TaskOutcome {
            name: entry.spec.name.clone(),
            action: entry.action,
            changed,
        });
    }
    Ok(outcomes)
}

/// Read the current state of one Task from the Task Scheduler
pub fn query_task(name: &str, api: TaskApi) -> Result<CurrentTaskSnapshot, ProviderError> {
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());

    let store = SchtasksStore::new(api);
    match read_task(&store, name) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[core] Failed to query task {name}: {err:?}");
            Err(ProviderError::Query)
        }
    }
}
