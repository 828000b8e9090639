//! Text encodings for reading and writing documentation pages.
//!
//! Pages are decoded to text before an injection plan is derived, and encoded
//! back with the same [`Charset`] when rewritten. Every supported charset
//! round-trips its own output exactly, so lines outside the injected region
//! keep their original bytes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported page encodings.
///
/// The names match external configuration strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Charset {
    /// UTF-8 (default)
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value
    #[serde(rename = "iso-8859-1", alias = "latin1", alias = "ISO-8859-1")]
    Latin1,
    /// 7-bit US-ASCII
    #[serde(rename = "us-ascii", alias = "ascii", alias = "US-ASCII")]
    Ascii,
}

/// Content that is not representable in a [`Charset`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("content at byte {offset} is not valid {charset}")]
pub struct CharsetError {
    charset: Charset,
    offset: usize,
}

impl CharsetError {
    /// The charset that rejected the content.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Byte offset of the first offending input.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Charset {
    /// Decodes `bytes` into text.
    ///
    /// # Errors
    ///
    /// Returns a [`CharsetError`] pointing at the first byte sequence that is
    /// invalid in this charset.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, CharsetError> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|err| CharsetError {
                charset: self,
                offset: err.utf8_error().valid_up_to(),
            }),
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            Self::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(offset) => Err(CharsetError {
                    charset: self,
                    offset,
                }),
                None => Ok(bytes.into_iter().map(char::from).collect()),
            },
        }
    }

    /// Encodes `text` into bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`CharsetError`] with the byte offset (in the UTF-8 text) of
    /// the first character this charset cannot represent.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, CharsetError> {
        let limit = match self {
            Self::Utf8 => return Ok(text.as_bytes().to_vec()),
            Self::Latin1 => 0xFF,
            Self::Ascii => 0x7F,
        };

        text.char_indices()
            .map(|(offset, c)| {
                u8::try_from(u32::from(c))
                    .ok()
                    .filter(|&byte| u32::from(byte) <= limit)
                    .ok_or(CharsetError {
                        charset: self,
                        offset,
                    })
            })
            .collect()
    }
}

impl FromStr for Charset {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "iso-8859-1" | "latin1" => Ok(Self::Latin1),
            "us-ascii" | "ascii" => Ok(Self::Ascii),
            _ => Err("Unsupported charset"),
        }
    }
}

impl From<Charset> for &'static str {
    fn from(val: Charset) -> Self {
        match val {
            Charset::Utf8 => "utf-8",
            Charset::Latin1 => "iso-8859-1",
            Charset::Ascii => "us-ascii",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_round_trip() {
        let bytes = "<p>Grüße</p>\r\n".as_bytes().to_vec();
        let text = Charset::Utf8.decode(bytes.clone()).unwrap();

        assert_eq!(Charset::Utf8.encode(&text).unwrap(), bytes);
    }

    #[test]
    fn test_utf8_invalid() {
        let err = Charset::Utf8.decode(vec![b'a', 0xFF, b'b']).unwrap_err();
        assert_eq!(err.offset(), 1);
        assert_eq!(err.charset(), Charset::Utf8);
    }

    #[test]
    fn test_latin1_round_trip_all_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = Charset::Latin1.decode(bytes.clone()).unwrap();

        assert_eq!(Charset::Latin1.encode(&text).unwrap(), bytes);
    }

    #[test]
    fn test_latin1_unrepresentable() {
        let err = Charset::Latin1.encode("ok €").unwrap_err();
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn test_ascii() {
        assert_eq!(Charset::Ascii.decode(b"plain".to_vec()).unwrap(), "plain");
        assert!(Charset::Ascii.decode(vec![0xE9]).is_err());
        assert!(Charset::Ascii.encode("é").is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!("UTF-8".parse::<Charset>(), Ok(Charset::Utf8));
        assert_eq!("latin1".parse::<Charset>(), Ok(Charset::Latin1));
        assert!("ebcdic".parse::<Charset>().is_err());
        assert_eq!(Charset::Latin1.to_string(), "iso-8859-1");
    }
}
