//! Structured error types for the Vitae rendering engine.
//!
//! The layout core itself does not produce errors at all: missing data is
//! skipped, oversized content is truncated by the overflow guard, and a
//! broken photo becomes a placeholder. What can fail is the boundary —
//! parsing the resume JSON and loading caller-supplied fonts.

use std::fmt;

/// The unified error type returned by the public Vitae API functions.
#[derive(Debug)]
pub enum VitaeError {
    /// JSON input failed to parse as a valid resume document.
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// A caller-registered font could not be parsed.
    FontError(String),
}

impl fmt::Display for VitaeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitaeError::ParseError { source, hint } => {
                write!(f, "Failed to parse resume: {}", source)?;
                if !hint.is_empty() {
                    write!(f, "\n  Hint: {}", hint)?;
                }
                Ok(())
            }
            VitaeError::FontError(msg) => write!(f, "Font error: {}", msg),
        }
    }
}

impl std::error::Error for VitaeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VitaeError::ParseError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the resume schema. Check field names and types."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VitaeError::ParseError { source: e, hint }
    }
}
