use super::{read_value, skip_element};
use crate::tasks::error::TaskError;
use common::windows::{ActionDefinition, ExecAction};
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse all Task Actions. Order is preserved
pub(crate) fn parse_actions(reader: &mut Reader<&[u8]>) -> Result<Vec<ActionDefinition>, TaskError> {
    let mut actions = Vec::new();

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Actions xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Exec" => actions.push(ActionDefinition::Exec(process_exec(reader)?)),
                b"ComHandler" => actions.push(process_com(reader)?),
                b"SendEmail" => {
                    skip_element(reader, tag.name())?;
                    actions.push(ActionDefinition::SendEmail);
                }
                b"ShowMessage" => {
                    skip_element(reader, tag.name())?;
                    actions.push(ActionDefinition::ShowMessage);
                }
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Actions" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(actions)
}

/// Parse Execution Task Action
fn process_exec(reader: &mut Reader<&[u8]>) -> Result<ExecAction, TaskError> {
    let mut exec = ExecAction {
        path: String::new(),
        arguments: None,
        working_directory: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Exec xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Command" => exec.path = read_value(reader, tag.name())?,
                b"Arguments" => exec.arguments = Some(read_value(reader, tag.name())?),
                b"WorkingDirectory" => {
                    exec.working_directory = Some(read_value(reader, tag.name())?);
                }
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Exec" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(exec)
}

/// Parse `COMHandler` Task Action
fn process_com(reader: &mut Reader<&[u8]>) -> Result<ActionDefinition, TaskError> {
    let mut class_id = String::new();

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read ComHandler xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"ClassId" => class_id = read_value(reader, tag.name())?,
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"ComHandler" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(ActionDefinition::ComHandler { class_id })
}
