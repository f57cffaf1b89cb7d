//! Error types for the vibecolor library

use thiserror::Error;

/// Result type alias for vibecolor operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Error taxonomy for palette generation and color analysis
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Hex color string is not exactly six hex digits after an optional `#`
    #[error("Invalid color format: {value:?} (expected 6 hex digits, optionally prefixed with '#')")]
    InvalidColorFormat { value: String },

    /// Image bytes could not be decoded
    #[error("Failed to decode image: {message}")]
    ImageDecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Semantic analysis provider failed or timed out
    #[error("Semantic analysis provider {provider} unavailable: {reason}")]
    AdapterUnavailable { provider: String, reason: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected fault while generating a palette
    #[error("Generation error: {message}")]
    GenerationError { message: String },
}

impl PaletteError {
    /// Create an invalid color format error for the offending input
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            value: value.into(),
        }
    }

    /// Create an image decode error with context
    pub fn image_decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageDecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an adapter unavailable error
    pub fn adapter(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AdapterUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Only provider failures are recovered internally (keyword fallback).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PaletteError::AdapterUnavailable { .. })
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaletteError::InvalidColorFormat { .. }
                | PaletteError::ImageDecodeError { .. }
                | PaletteError::InvalidParameter { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidColorFormat { value } => {
                format!("'{}' is not a valid hex color. Use a format like #FF5733.", value)
            }
            PaletteError::ImageDecodeError { .. } => {
                "Could not read the image. Please upload a valid image file.".to_string()
            }
            PaletteError::InvalidParameter { parameter, .. } => {
                format!("The value for '{}' is out of range.", parameter)
            }
            PaletteError::AdapterUnavailable { .. } => {
                "AI analysis is currently unavailable. A keyword-based palette was used instead."
                    .to_string()
            }
            _ => "Palette generation failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(PaletteError::adapter("groq", "timeout").is_recoverable());
        assert!(!PaletteError::invalid_color("#12").is_recoverable());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(PaletteError::invalid_color("zzz").is_client_error());
        assert!(PaletteError::invalid_parameter("num_colors", 40).is_client_error());
        assert!(!PaletteError::GenerationError {
            message: "boom".into()
        }
        .is_client_error());
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = PaletteError::GenerationError {
            message: "index out of bounds at clustering.rs:88".into(),
        };
        assert!(!err.user_message().contains("clustering.rs"));
    }

    #[test]
    fn test_display_names_input() {
        let err = PaletteError::invalid_color("#GGGGGG");
        assert!(err.to_string().contains("#GGGGGG"));
    }
}
