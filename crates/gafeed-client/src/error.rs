use thiserror::Error;

/// Request arguments rejected before any network access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start_date is required")]
    MissingStartDate,

    #[error("end_date is required")]
    MissingEndDate,

    #[error("you can only have a maximum of {max} dimensions (got {got})")]
    TooManyDimensions { max: usize, got: usize },

    #[error("you can only have a maximum of {max} metrics (got {got})")]
    TooManyMetrics { max: usize, got: usize },

    /// Also raised for filters on fields outside the requested dimensions and
    /// metrics; callers match on this variant for both cases.
    #[error("{0}")]
    InvalidSort(String),

    #[error(
        "the filter '{0}' is invalid; filters should look like 'browser == Firefox' or 'browser==Firefox'"
    )]
    InvalidFilter(String),
}

/// A completed HTTP exchange whose status was not 200.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{body} (status code: {status})")]
    AnalyticsError { status: u16, body: String },

    #[error("your authorization token is invalid or has expired (status code: {status})")]
    InvalidToken { status: u16, body: String },

    #[error("{body} (status code: {status})")]
    UnknownAnalyticsError { status: u16, body: String },
}

impl TransportError {
    /// HTTP status code of the failed exchange.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::AnalyticsError { status, .. }
            | Self::InvalidToken { status, .. }
            | Self::UnknownAnalyticsError { status, .. } => *status,
        }
    }

    /// Response body of the failed exchange, verbatim.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::AnalyticsError { body, .. }
            | Self::InvalidToken { body, .. }
            | Self::UnknownAnalyticsError { body, .. } => body,
        }
    }
}

/// Errors returned by the analytics client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The feed parsed as XML but did not have the expected shape.
    #[error("feed decode error for {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error("no profile id configured; set one before requesting report data")]
    MissingProfileId,

    /// The auth token contains bytes that cannot be sent in a header.
    #[error("auth token is not a valid HTTP header value")]
    InvalidAuthToken,
}

impl ClientError {
    pub(crate) fn decode(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
