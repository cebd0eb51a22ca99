// Text encodings a catalog can be stored in

use std::fmt;

use crate::error::{DecodeError, EncodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Cloud-storage file
    #[default]
    Utf8,
    /// Chromium local-storage 8-bit form
    Latin1,
    /// Chromium local-storage wide form
    Utf16Le,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("UTF-8"),
            TextEncoding::Latin1 => f.write_str("Latin-1"),
            TextEncoding::Utf16Le => f.write_str("UTF-16LE"),
        }
    }
}

impl TextEncoding {
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|_| DecodeError::InvalidText(self)),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(DecodeError::InvalidText(self));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| DecodeError::InvalidText(self))
            }
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| EncodeError::Unrepresentable(self)))
                .collect(),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        }
    }

    /// Whether every character of `text` fits this encoding
    pub fn can_represent(self, text: &str) -> bool {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf16Le => true,
            TextEncoding::Latin1 => text.chars().all(|c| u32::from(c) <= 0xFF),
        }
    }
}
