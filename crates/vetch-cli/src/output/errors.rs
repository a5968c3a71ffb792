//! Error message formatting with actionable suggestions.
//!
//! Formats a VetchError with its source chain and, when available, a
//! suggestion line for fixing the problem.

use super::colors::ColorSupport;
use std::error::Error;
use vetch_core::error::VetchError;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &VetchError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_error_with_suggestion() {
        let formatter = ErrorFormatter {
            colors: ColorSupport::disabled(),
        };
        let error = VetchError::InvalidSpecifier {
            name: "boto3".to_string(),
            reason: "Invalid version format: x".to_string(),
        };

        let formatted = formatter.format_error(&error);
        assert!(formatted.starts_with("error: "));
        assert!(formatted.contains("boto3"));
        assert!(formatted.contains("help: "));
    }

    #[test]
    fn formats_source_chain() {
        let formatter = ErrorFormatter {
            colors: ColorSupport::disabled(),
        };
        let error = VetchError::io(
            "Failed to read vetch.toml".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );

        let formatted = formatter.format_error(&error);
        assert!(formatted.contains("caused by: no such file"));
    }
}
