//! Text encodings accepted by string hashing

use crate::error::{HasherError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding used to turn text into bytes before hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// UTF-16, little endian with a leading byte order mark
    Utf16,
    /// UTF-16 little endian, no BOM
    Utf16Le,
    /// UTF-16 big endian, no BOM
    Utf16Be,
    /// 7-bit ASCII
    Ascii,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Utf16Le => "utf-16-le",
            Self::Utf16Be => "utf-16-be",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
        }
    }

    /// Encode `text`, failing on the first character the encoding cannot represent
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16 => {
                let mut bytes = vec![0xFF, 0xFE];
                bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                Ok(bytes)
            }
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Ascii => self.encode_single_byte(text, 0x7F),
            Self::Latin1 => self.encode_single_byte(text, 0xFF),
        }
    }

    fn encode_single_byte(&self, text: &str, max: u32) -> Result<Vec<u8>> {
        text.chars()
            .enumerate()
            .map(|(position, character)| {
                let code = u32::from(character);
                if code > max {
                    return Err(HasherError::Encoding {
                        encoding: *self,
                        character,
                        position,
                    });
                }
                Ok(code as u8)
            })
            .collect()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16" | "utf16" => Ok(Self::Utf16),
            "utf-16-le" | "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
            "utf-16-be" | "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            _ => Err(HasherError::UnknownEncoding(s.to_string())),
        }
    }
}
