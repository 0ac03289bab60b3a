//! Warnings reported while loading dictionaries.

use std::fmt;

/// A non-fatal problem found while parsing an aff/dic pair.
///
/// Warnings never abort a load. The parser continues with the best
/// recoverable interpretation and hands each warning to a [`DiagSink`]
/// in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line is ill-formed UTF-8 although the declared encoding is UTF-8.
    InvalidUtf8 {
        /// 1-based source line.
        line: usize,
    },

    /// A flag token is malformed or carries a reserved or oversized value.
    FlagSyntax {
        /// 1-based source line.
        line: usize,
    },

    /// A command expected a flag and none is present.
    MissingFlag {
        /// 1-based source line.
        line: usize,
    },

    /// A flag alias index is not a number or lies outside the alias table.
    AliasIndex {
        /// 1-based source line.
        line: usize,
    },

    /// The FLAG command named an unknown flag type.
    UnknownFlagType {
        /// 1-based source line.
        line: usize,
        /// The unrecognized value.
        value: String,
    },

    /// A counted table is missing its header count.
    ZeroCount {
        /// 1-based source line.
        line: usize,
        /// The command that opened the table.
        command: String,
    },

    /// A counted table received more entries than its declared count.
    ExtraEntry {
        /// 1-based source line.
        line: usize,
        /// The command whose count is exhausted.
        command: String,
    },

    /// A PFX/SFX header is missing its cross-product marker or count.
    AffixHeader {
        /// 1-based source line.
        line: usize,
    },

    /// A UTF-8 flag lies outside the Basic Multilingual Plane.
    NonBmpFlag {
        /// 1-based source line.
        line: usize,
    },

    /// A first-occurrence-wins command was set a second time.
    SetTwice {
        /// 1-based source line.
        line: usize,
        /// The repeated command.
        command: String,
    },

    /// An unrecognized command was skipped.
    UnknownCommand {
        /// 1-based source line.
        line: usize,
        /// The skipped command.
        command: String,
    },

    /// Flag bytes do not match the declared file encoding.
    EncodingMismatch {
        /// 1-based source line.
        line: usize,
    },

    /// The encoding label has no supported conversion; Latin-1 semantics
    /// are used instead.
    UnknownEncoding {
        /// The normalized encoding name.
        name: String,
    },

    /// An affix condition did not compile; the entry was dropped.
    BadCondition {
        /// 1-based source line.
        line: usize,
    },

    /// A line could not be parsed and was skipped or truncated.
    MalformedLine {
        /// 1-based source line.
        line: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidUtf8 { line } => {
                write!(f, "line {}: ill-formed UTF-8 in a UTF-8 encoded file", line)
            }
            Self::FlagSyntax { line } => {
                write!(f, "line {}: malformed or out-of-range flag", line)
            }
            Self::MissingFlag { line } => {
                write!(f, "line {}: a flag is expected and none is present", line)
            }
            Self::AliasIndex { line } => {
                write!(f, "line {}: invalid flag alias index", line)
            }
            Self::UnknownFlagType { line, value } => {
                write!(
                    f,
                    "line {}: unknown FLAG type {}, expected LONG, NUM or UTF-8",
                    line, value
                )
            }
            Self::ZeroCount { line, command } => {
                write!(
                    f,
                    "line {}: {} table has no count, ignoring all of its entries",
                    line, command
                )
            }
            Self::ExtraEntry { line, command } => {
                write!(f, "line {}: extra entries of {}", line, command)
            }
            Self::AffixHeader { line } => {
                write!(
                    f,
                    "line {}: affix header is missing its cross-product marker or count",
                    line
                )
            }
            Self::NonBmpFlag { line } => {
                write!(
                    f,
                    "line {}: flags must lie in the Basic Multilingual Plane, skipping",
                    line
                )
            }
            Self::SetTwice { line, command } => {
                write!(f, "line {}: setting {} more than once, ignoring", line, command)
            }
            Self::UnknownCommand { line, command } => {
                write!(f, "line {}: unknown command {}", line, command)
            }
            Self::EncodingMismatch { line } => {
                write!(
                    f,
                    "line {}: flag bytes do not match the declared encoding",
                    line
                )
            }
            Self::UnknownEncoding { name } => {
                write!(f, "unsupported encoding {}, assuming Latin-1", name)
            }
            Self::BadCondition { line } => {
                write!(
                    f,
                    "line {}: affix condition does not compile, dropping the entry",
                    line
                )
            }
            Self::MalformedLine { line } => {
                write!(f, "line {}: could not parse line", line)
            }
        }
    }
}

/// Receives the warnings emitted during a load.
pub trait DiagSink {
    /// Called once per warning, in source order.
    fn warning(&mut self, warning: Warning);
}

impl DiagSink for Vec<Warning> {
    fn warning(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// A sink forwarding every warning to the `log` crate at warn level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagSink for LogSink {
    fn warning(&mut self, warning: Warning) {
        log::warn!("{}", warning);
    }
}
