use thiserror::Error;

/// Everything that can go wrong between building a request and decoding its payload.
#[derive(Debug, Error)]
pub enum Error {
    /// Request payload could not be encoded as JSON.
    #[error("could not marshal request body: {0}")]
    RequestEncoding(#[source] serde_json::Error),

    /// Request could not be built: malformed `api_url` or a token/user agent
    /// that is not a valid header value. Nothing was sent.
    #[error("could not build request: {0}")]
    Request(#[source] reqwest::Error),

    /// Connection or TLS failure reported by the transport.
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// Response body is not a JSON envelope. Carries the raw body.
    #[error("could not unmarshal json response: {source}")]
    InvalidResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Token expired (41808) or invalid (41809).
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing headers: {0}")]
    MissingHeaders(String),

    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Soft limit (40400): requests sent too frequently.
    #[error("too many requests: {0}")]
    TooManyRequests(String),

    /// Hard limit (40402). Callers are expected to back off on this one.
    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Any other non-zero error code.
    #[error("invalid response, got error code: {code}, message: {message}")]
    ApiError { code: i64, message: String },

    /// Envelope reported success but `result` has an unexpected shape.
    #[error("unexpected API response: {0}")]
    UnexpectedApiResponse(#[source] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn is_rate_limit_exceeded(&self) -> bool {
        matches!(self, Error::RateLimitExceeded(_))
    }
}
