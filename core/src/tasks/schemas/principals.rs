use super::{read_value, skip_element};
use crate::tasks::error::TaskError;
use common::windows::TaskPrincipal;
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse the Principals for a Task. Only the first Principal is used
pub(crate) fn parse_principals(reader: &mut Reader<&[u8]>) -> Result<Option<TaskPrincipal>, TaskError> {
    let mut principal = None;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Principals xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Principal" if principal.is_none() => {
                    principal = Some(process_principal(reader)?);
                }
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Principals" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(principal)
}

/// Parse a single Principal
fn process_principal(reader: &mut Reader<&[u8]>) -> Result<TaskPrincipal, TaskError> {
    let mut info = TaskPrincipal {
        user_id: None,
        run_level: None,
    };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Principal xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"UserId" => info.user_id = Some(read_value(reader, tag.name())?),
                b"RunLevel" => info.run_level = run_level_code(&read_value(reader, tag.name())?),
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Principal" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(info)
}

/// Map the XML run level name to its `TASK_RUNLEVEL` value
fn run_level_code(value: &str) -> Option<u32> {
    match value {
        "LeastPrivilege" => Some(0),
        "HighestAvailable" => Some(1),
        _ => None,
    }
}
