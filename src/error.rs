use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the listing backend.
///
/// `NotFound` maps to a 404-equivalent, the remote variants to 502/503, and
/// the rest are fatal to the request that triggered them. Retrying is caller
/// policy; nothing in this crate retries on its own. Malformed *inputs* (as
/// opposed to malformed configuration) never become errors: the text helpers
/// return their documented empty/`None` sentinels instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown college, program, or area.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote storage collaborator failed (network, auth, decode).
    #[error("remote storage unavailable: {0}")]
    RemoteUnavailable(#[from] reqwest::Error),

    /// The remote storage collaborator answered with a non-success status.
    #[error("remote storage returned HTTP {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// Unknown type-filter name or malformed catalog entry.
    #[error("configuration error: {0}")]
    Config(String),

    /// The catalog source could not be read.
    #[error("catalog unavailable: {0}")]
    CatalogIo(#[from] std::io::Error),

    /// The catalog source could not be parsed.
    #[error("catalog unavailable: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
