//! Error types for script parsing.

use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that stop a parse
///
/// Unrecognized lines never produce an error; they are dropped.
#[derive(Error, Debug)]
pub enum ParseError {
    /// An `INT.`/`EXT.` line with neither ` -- ` nor ` - ` between place and time
    #[error("Malformed scene heading at line {line}: {content:?}")]
    MalformedSceneHeading { line: usize, content: String },

    /// The underlying reader failed
    #[error("I/O error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create a malformed scene heading error
    pub fn malformed_scene_heading(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedSceneHeading {
            line,
            content: content.into(),
        }
    }

    /// Line number (1-indexed) the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedSceneHeading { line, .. } | Self::Io { line, .. } => *line,
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedSceneHeading { .. } => "PS001",
            Self::Io { .. } => "PS002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ParseError::malformed_scene_heading(12, "INT. HOUSE / DAY");
        assert_eq!(err.code(), "PS001");
        assert_eq!(err.line(), 12);

        let err = ParseError::Io {
            line: 3,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        assert_eq!(err.code(), "PS002");
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::malformed_scene_heading(42, "EXT. GARDEN AT DUSK");
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("EXT. GARDEN AT DUSK"));
    }
}
