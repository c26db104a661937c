use super::{
    error::TaskError,
    schemas::{actions::parse_actions, principals::parse_principals, triggers::parse_triggers},
};
use common::windows::TaskDefinition;
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse an exported Schedule Task XML definition. Works for a single `Task` or a `Tasks` export
pub(crate) fn parse_task_xml(xml: &str) -> Result<TaskDefinition, TaskError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut definition = TaskDefinition::default();
    let mut has_task = false;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Task xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                // Export of multiple Tasks. Only the first one is used
                b"Task" if has_task => break,
                b"Task" => has_task = true,
                b"Triggers" => definition.triggers = parse_triggers(&mut reader)?,
                b"Principals" => definition.principal = parse_principals(&mut reader)?,
                b"Actions" => definition.actions = parse_actions(&mut reader)?,
                _ => continue,
            },
            _ => continue,
        }
    }

    if !has_task {
        error!("[tasks] XML data did not contain a Task");
        return Err(TaskError::ReadXml);
    }

    Ok(definition)
}
