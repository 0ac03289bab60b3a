//! Encoding negotiation and Unicode casing utilities.

use crate::errors::{LegatoError, Result};

/// The file encoding declared by SET, normalized.
///
/// Names are uppercased and the synonym `UTF8` is rewritten to `UTF-8`.
/// An empty name means the command never appeared; the default repertoire
/// is then ISO-8859-1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoding {
    name: String,
}

impl Encoding {
    /// Creates a normalized encoding from a raw SET value.
    pub fn new(name: &str) -> Self {
        let mut name = name.to_ascii_uppercase();
        if name == "UTF8" {
            name = "UTF-8".to_string();
        }
        Self { name }
    }

    /// Returns the normalized name; empty when never set.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if no SET command has been seen.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns true if the file is UTF-8 encoded.
    #[inline(always)]
    pub fn is_utf8(&self) -> bool {
        self.name == "UTF-8"
    }

    /// Decodes raw bytes in this encoding into Unicode text.
    ///
    /// # Errors
    ///
    /// [`LegatoError::UnknownEncoding`] when no conversion is available
    /// for the encoding name.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.conv()?.decode(bytes))
    }

    /// Encodes Unicode text into raw bytes in this encoding.
    ///
    /// # Errors
    ///
    /// [`LegatoError::UnknownEncoding`] when no conversion is available
    /// for the encoding name.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(self.conv()?.encode(text))
    }

    pub(crate) fn conv(&self) -> Result<TextConv> {
        if self.is_utf8() {
            return Ok(TextConv::Utf8);
        }
        if self.is_empty() {
            return Ok(TextConv::Latin1);
        }
        match encoding_rs::Encoding::for_label(self.name.as_bytes()) {
            Some(codec) => Ok(TextConv::SingleByte(codec)),
            None => Err(LegatoError::unknown_encoding(&self.name)),
        }
    }
}

/// Converter between raw bytes in the file encoding and Unicode text.
#[derive(Clone, Copy, Debug)]
pub(crate) enum TextConv {
    Utf8,
    Latin1,
    SingleByte(&'static encoding_rs::Encoding),
}

impl TextConv {
    pub(crate) fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::SingleByte(codec) => codec.decode_without_bom_handling(bytes).0.into_owned(),
        }
    }

    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Latin1 => text
                .chars()
                .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
                .collect(),
            Self::SingleByte(codec) => codec.encode(text).0.into_owned(),
        }
    }
}

/// Casing shape of a word under Unicode default case mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Casing {
    /// No uppercase letters.
    AllLower,
    /// Uppercase letters only.
    AllUpper,
    /// A single capital, in leading position.
    Title,
    /// A leading capital with further capitals inside.
    Camel,
    /// A leading lowercase letter with capitals inside.
    Mixed,
}

/// Classifies the casing shape of `word`.
pub fn classify_casing(word: &str) -> Casing {
    let mut upper = 0usize;
    let mut lower = 0usize;
    for c in word.chars() {
        if c.is_uppercase() {
            upper += 1;
        } else if c.is_lowercase() {
            lower += 1;
        }
    }
    if upper == 0 {
        return Casing::AllLower;
    }
    if lower == 0 {
        return Casing::AllUpper;
    }
    if word.chars().next().map_or(false, char::is_uppercase) {
        if upper == 1 {
            Casing::Title
        } else {
            Casing::Camel
        }
    } else {
        Casing::Mixed
    }
}

/// Returns true if `bytes` form well-formed UTF-8.
pub fn validate_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Upper-cases text with Unicode default case mapping.
pub(crate) fn to_upper(text: &str) -> String {
    text.chars().flat_map(char::to_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(Encoding::new("utf8").name(), "UTF-8");
        assert_eq!(Encoding::new("utf-8").name(), "UTF-8");
        assert_eq!(Encoding::new("iso8859-1").name(), "ISO8859-1");
        assert!(Encoding::new("UTF-8").is_utf8());
        assert!(Encoding::default().is_empty());
    }

    #[test]
    fn test_latin1_roundtrip() {
        let enc = Encoding::default();
        let text = enc.decode(&[b'h', 0xE9, b'j']).unwrap();
        assert_eq!(text, "héj");
        assert_eq!(enc.encode(&text).unwrap(), vec![b'h', 0xE9, b'j']);
    }

    #[test]
    fn test_unknown_encoding() {
        let enc = Encoding::new("KOI-INVALID");
        assert!(enc.decode(b"abc").is_err());
    }

    #[test]
    fn test_classify_casing() {
        assert_eq!(classify_casing("foo"), Casing::AllLower);
        assert_eq!(classify_casing("1234"), Casing::AllLower);
        assert_eq!(classify_casing("FOO"), Casing::AllUpper);
        assert_eq!(classify_casing("F"), Casing::AllUpper);
        assert_eq!(classify_casing("Foo"), Casing::Title);
        assert_eq!(classify_casing("McDonald"), Casing::Camel);
        assert_eq!(classify_casing("mcDonald"), Casing::Mixed);
        assert_eq!(classify_casing("İstanbul"), Casing::Title);
    }

    #[test]
    fn test_validate_utf8() {
        assert!(validate_utf8("szálló".as_bytes()));
        assert!(!validate_utf8(&[0xFF, 0xFE]));
    }

    #[test]
    fn test_to_upper() {
        assert_eq!(to_upper("straße"), "STRASSE");
        assert_eq!(to_upper("foo"), "FOO");
    }
}
