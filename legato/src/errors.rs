//! Definition of errors.

use std::error::Error;
use std::fmt;

use crate::dictionary::flags::Flag;

/// A specialized Result type for Legato.
pub type Result<T, E = LegatoError> = std::result::Result<T, E>;

/// The error type for Legato.
#[derive(Debug)]
pub enum LegatoError {
    /// The error variant for [`InvalidFormatError`].
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`CrossProductError`].
    CrossProduct(CrossProductError),

    /// The error variant for [`UnknownEncodingError`].
    UnknownEncoding(UnknownEncodingError),

    /// The error variant for [`std::io::Error`].
    StdIo(std::io::Error),
}

impl LegatoError {
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn cross_product(flag: Flag) -> Self {
        Self::CrossProduct(CrossProductError { flag })
    }

    pub(crate) fn unknown_encoding<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Self::UnknownEncoding(UnknownEncodingError { name: name.into() })
    }
}

impl fmt::Display for LegatoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidFormat(e) => e.fmt(f),
            Self::CrossProduct(e) => e.fmt(f),
            Self::UnknownEncoding(e) => e.fmt(f),
            Self::StdIo(e) => e.fmt(f),
        }
    }
}

impl Error for LegatoError {}

/// Error used when an input file breaks the expected format.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Name of the input.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// Error used when one flag is declared with conflicting cross-product
/// values.
#[derive(Debug)]
pub struct CrossProductError {
    /// The conflicting flag.
    pub(crate) flag: Flag,
}

impl fmt::Display for CrossProductError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CrossProductError: flag {:#06x} is used with conflicting cross-product values",
            self.flag
        )
    }
}

impl Error for CrossProductError {}

/// Error used when no conversion is available for an encoding label.
#[derive(Debug)]
pub struct UnknownEncodingError {
    /// The normalized encoding name.
    pub(crate) name: String,
}

impl fmt::Display for UnknownEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "UnknownEncodingError: no conversion is available for {}",
            self.name
        )
    }
}

impl Error for UnknownEncodingError {}

impl From<std::io::Error> for LegatoError {
    fn from(error: std::io::Error) -> Self {
        Self::StdIo(error)
    }
}
