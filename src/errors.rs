use thiserror::Error;

/// Errors raised by a [`DataFetcher`](crate::fetcher::DataFetcher) request
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    /// The body was not the JSON shape the resource is documented to have
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    /// A resource reference inside an otherwise valid body was unusable
    #[error("malformed resource reference {url}")]
    MalformedResource { url: String },
}

/// Errors surfaced to the UI controller by a catalog session
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog or category-index load failed; nothing can be shown until retried
    #[error("catalog initialization failed: {0}")]
    Initialization(#[source] FetchError),
    /// The detail view could not be fetched
    #[error("could not load details: {0}")]
    Detail(#[source] FetchError),
    /// No catalog entry matches the requested name or id
    #[error("no Pokemon named or numbered '{0}' in the catalog")]
    UnknownEntry(String),
}

/// Errors related to loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Malformed input handed to the selection parsers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown filter category '{0}' (expected type, color or gender)")]
    UnknownCategory(String),
    #[error("the {0} filter needs at least one value")]
    MissingValue(String),
    #[error("gender is single-choice, got {0} values")]
    MultipleGenders(usize),
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
