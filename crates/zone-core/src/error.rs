use thiserror::Error;

/// Why the catalog manifest could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The endpoint answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    /// The body was not a JSON array of zone records.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a zone could not be opened.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    #[error("display surface unavailable: {0}")]
    Surface(#[from] std::io::Error),
    #[error("could not hand off to the browser: {0}")]
    Navigate(#[source] anyhow::Error),
    #[error("no zone is open")]
    NothingOpen,
}
