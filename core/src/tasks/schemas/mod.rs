use crate::tasks::error::TaskError;
use log::error;
use quick_xml::{escape::unescape, name::QName, Reader};

pub(crate) mod actions;
pub(crate) mod principals;
pub(crate) mod triggers;

/// Read the text of the current element and expand XML escapes
pub(crate) fn read_value(
    reader: &mut Reader<&[u8]>,
    name: QName<'_>,
) -> Result<String, TaskError> {
    let text = match reader.read_text(name) {
        Ok(result) => result,
        Err(err) => {
            error!("[tasks] Could not read xml text: {err:?}");
            return Err(TaskError::ReadXml);
        }
    };
    match unescape(&text) {
        Ok(value) => Ok(value.to_string()),
        Err(err) => {
            error!("[tasks] Could not unescape xml text {text}: {err:?}");
            Err(TaskError::ReadXml)
        }
    }
}

/// Skip the current element and everything nested under it
pub(crate) fn skip_element(
    reader: &mut Reader<&[u8]>,
    name: QName<'_>,
) -> Result<(), TaskError> {
    if let Err(err) = reader.read_to_end(name) {
        error!("[tasks] Could not skip xml element: {err:?}");
        return Err(TaskError::ReadXml);
    }
    Ok(())
}
