use super::{
    error::UtilError,
    nom_helper::{nom_unsigned_two_bytes, Endian},
    strings::{extract_utf16_string, extract_utf8_string},
};
use log::error;

/// Decode XML bytes produced by Windows tools. Task XML is normally UTF16, but may be UTF8 when redirected
pub(crate) fn decode_xml(bytes: &[u8]) -> Result<String, UtilError> {
    let utf_check = nom_unsigned_two_bytes(bytes, Endian::Be);
    let (data, utf_status) = match utf_check {
        Ok(result) => result,
        Err(_err) => {
            error!("[core] Could not determine UTF encoding for XML");
            return Err(UtilError::UtfType);
        }
    };

    let utf16_le = 0xfffe;
    let utf16_be = 0xfeff;

    let xml_string = if utf_status == utf16_le {
        extract_utf16_string(data, true)
    } else if utf_status == utf16_be {
        extract_utf16_string(data, false)
    } else if bytes[1] == 0 {
        // UTF16 LE without a byte order mark. Ex: "<\0?\0"
        extract_utf16_string(bytes, true)
    } else {
        extract_utf8_string(bytes)
    };

    Ok(xml_string)
}
