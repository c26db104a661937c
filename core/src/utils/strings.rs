use log::warn;
use std::string::FromUtf16Error;

/// Get a UTF8 string from provided bytes data. Invalid UTF8 will be replaced
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    match String::from_utf8(data.to_vec()) {
        Ok(result) => result.trim_start_matches('\u{feff}').to_string(),
        Err(err) => {
            warn!("[strings] Failed to get UTF8 string: {err:?}");
            String::from_utf8_lossy(data).to_string()
        }
    }
}

/// Get a UTF16 string from provided bytes data. Byte order must be known
pub(crate) fn extract_utf16_string(data: &[u8], little_endian: bool) -> String {
    match bytes_to_utf16_string(data, little_endian) {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF16 string: {err:?}");
            String::new()
        }
    }
}

/// Get a UTF16 string from provided bytes data
fn bytes_to_utf16_string(data: &[u8], little_endian: bool) -> Result<String, FromUtf16Error> {
    let mut utf16_data: Vec<u16> = Vec::new();
    let min_byte_size = 2;
    for wide_char in data.chunks(min_byte_size) {
        // Odd trailing byte
        if wide_char.len() < min_byte_size {
            break;
        }

        let value = if little_endian {
            u16::from_le_bytes([wide_char[0], wide_char[1]])
        } else {
            u16::from_be_bytes([wide_char[0], wide_char[1]])
        };
        utf16_data.push(value);
    }

    String::from_utf16(&utf16_data)
}
