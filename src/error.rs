use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid scenario: {0}")]
    ScenarioError(String),

    #[error("Unreadable markup: {0}")]
    MarkupError(String),
}

impl ReaderError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ReaderError::UrlParseError(_) => Some(
                "Pass an absolute URL including the scheme, e.g. https://example.com/recipes/pancakes"
            ),
            ReaderError::TomlError(_) | ReaderError::ScenarioError(_) => Some(
                "Each [[load]] entry needs a `url` and an `html` file path relative to the scenario"
            ),
            ReaderError::IoError(_) => Some(
                "Check that the markup file exists and is readable"
            ),
            ReaderError::MarkupError(_) => Some(
                "Save the page with your browser's \"Save Page As\" and pass the .html file"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
