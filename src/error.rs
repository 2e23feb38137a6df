use thiserror::Error;

/// Main error type for profile-recap
#[derive(Error, Debug)]
pub enum RecapError {
    /// Malformed records, mismatched parallel sequences, out-of-range percents
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Commit timestamp not in `YYYY-MM-DDTHH:MM:SSZ` form
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Unrecognized IANA time zone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Aggregation over an empty domain
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WakaTime API errors
    #[error("WakaTime API error: {0}")]
    WakaTimeApi(String),

    /// README does not carry the section markers
    #[error("Section markers for '{0}' not found in document")]
    MissingSection(String),

    /// Regex errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for profile-recap operations
pub type Result<T> = std::result::Result<T, RecapError>;

impl RecapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new WakaTime API error
    pub fn wakatime_api<S: Into<String>>(msg: S) -> Self {
        Self::WakaTimeApi(msg.into())
    }
}
