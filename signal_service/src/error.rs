use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceConfigError {
    #[error("user agent required to create service configuration")]
    MissingUserAgent,
    #[error("user agent is not a valid header value")]
    InvalidUserAgent(#[from] http::header::InvalidHeaderValue),
    #[error("zkgroup server public params override is not valid base64")]
    PublicParamsDecode(#[from] base64::DecodeError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CdnUrlError {
    #[error("no urls configured for cdn {0}")]
    UnknownCdn(u32),
}

#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("failed to read properties from {path}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed \\uxxxx escape in {0:?}")]
    MalformedEscape(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
