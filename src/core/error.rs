//! Error types for the logger hierarchy

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Output section without a `type` key
    #[error("plugin name not specified")]
    TypeNotSpecified,

    /// Output section names a plugin nobody registered
    #[error("unknown logging plugin: {0}")]
    UnknownPlugin(String),

    /// Plugin option required but absent
    #[error("{plugin} output: option '{option}' not specified")]
    MissingOption { plugin: String, option: String },

    /// Plugin option present but not one of the accepted values
    #[error("{plugin} output: invalid value '{value}' for option '{option}'")]
    InvalidOption {
        plugin: String,
        option: String,
        value: String,
    },

    /// Output section `threshold` is not a level name
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Logger entry (or any parse) names an unknown level
    #[error("unknown logging level: {0}")]
    UnknownLevel(String),

    /// Logger entry references an output that was not declared
    #[error("unknown logging output: {0}")]
    UnknownOutput(String),

    /// Configuration has no `loggers` section
    #[error("loggers section not specified")]
    LoggersSectionMissing,

    /// Malformed configuration text
    #[error("configuration parse error at line {line}: {message}")]
    ConfigParse { line: usize, message: String },

    /// Malformed format template
    #[error("invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// Environment variable holding the configuration path is unset
    #[error("{0} not set")]
    EnvNotSet(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn unknown_plugin(name: impl Into<String>) -> Self {
        LoggerError::UnknownPlugin(name.into())
    }

    /// Create a missing plugin option error
    pub fn missing_option(plugin: impl Into<String>, option: impl Into<String>) -> Self {
        LoggerError::MissingOption {
            plugin: plugin.into(),
            option: option.into(),
        }
    }

    /// Create an invalid plugin option error
    pub fn invalid_option(
        plugin: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        LoggerError::InvalidOption {
            plugin: plugin.into(),
            option: option.into(),
            value: value.into(),
        }
    }

    pub fn config_parse(line: usize, message: impl Into<String>) -> Self {
        LoggerError::ConfigParse {
            line,
            message: message.into(),
        }
    }

    /// Create a template error
    pub fn invalid_template(template: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidTemplate {
            template: template.into(),
            message: message.into(),
        }
    }
}
