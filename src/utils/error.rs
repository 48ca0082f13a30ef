use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown tile provider '{name}' (known providers: {known})")]
    UnknownTileProvider { name: String, known: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    TileProvider,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::IoError(_) => ErrorCategory::Io,
            MapError::SerializationError(_) | MapError::RenderError { .. } => {
                ErrorCategory::Rendering
            }
            MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MapError::UnknownTileProvider { .. } => ErrorCategory::TileProvider,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::TileProvider => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Rendering => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MapError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            MapError::SerializationError(_) | MapError::RenderError { .. } => {
                "This is a bug in map-export; please report it with your configuration".to_string()
            }
            MapError::ConfigValidationError { field, .. }
            | MapError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in your config file or command line", field)
            }
            MapError::MissingConfigError { field } => {
                format!("Add the '{}' setting to your configuration", field)
            }
            MapError::UnknownTileProvider { known, .. } => format!(
                "Use one of: {}, or pass a URL template with {{z}}/{{x}}/{{y}} and an attribution",
                known
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MapError::IoError(e) => format!("Could not write the map file: {}", e),
            MapError::SerializationError(_) | MapError::RenderError { .. } => {
                format!("Failed to render the map: {}", self)
            }
            MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            MapError::UnknownTileProvider { name, .. } => {
                format!("Tile provider '{}' is not recognised", name)
            }
        }
    }

    pub(crate) fn invalid_value(
        field: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        MapError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
