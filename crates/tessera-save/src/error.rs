//! Error types for save and load.

use std::fmt;
use std::io;

use tessera_core::LoadError;

/// Errors that can occur while reading or writing a save file.
#[derive(Debug)]
pub enum SaveError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The file does not start with the expected `b"TSRA"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// The record could not be decoded (truncated, wrong kind or absurd sizes).
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The payload does not hash to the stored checksum.
    ChecksumMismatch {
        /// Checksum stored in the file.
        stored: u64,
        /// Checksum of the payload as read.
        computed: u64,
    },
    /// The payload decoded but is not a valid session.
    Load(LoadError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"TSRA\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed record: {detail}"),
            Self::ChecksumMismatch { stored, computed } => {
                write!(
                    f,
                    "checksum mismatch: stored={stored:#018x}, computed={computed:#018x}"
                )
            }
            Self::Load(e) => write!(f, "invalid session: {e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LoadError> for SaveError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn sources_are_chained() {
        let err = SaveError::from(io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(err.source().is_some());

        let err = SaveError::from(LoadError::WrongLength {
            expected: 16,
            found: 2,
        });
        assert!(err.to_string().contains("16"));
        assert!(err.source().is_some());

        assert!(SaveError::InvalidMagic.source().is_none());
    }
}
