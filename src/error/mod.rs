//! Error types for edgediag

use k8s_openapi::api::core::v1::PodStatus;
use thiserror::Error;

/// Main error type for edgediag
#[derive(Debug, Error)]
pub enum DiagError {
    #[error("edgecore is not running")]
    ProcessNotRunning,

    #[error("edge config does not exist: {0}")]
    ConfigMissing(String),

    #[error("failed to parse edgecore config: {0}")]
    ConfigParse(String),

    #[error("dataSource does not exist: {0}")]
    DataSourceMissing(String),

    #[error("edgehub is not enabled")]
    HubDisabled,

    #[error("connection to {url} failed: {detail}")]
    NetworkUnreachable { url: String, detail: String },

    #[error("failed to open metadata store: {0}")]
    StoreInit(String),

    #[error("metadata store query failed: {0}")]
    StoreQuery(#[from] rusqlite::Error),

    #[error("could not find {0} in metadata store")]
    PodNotFound(String),

    /// A stored record did not decode. The status value produced by the
    /// failed decode attempt (the zero value) travels with the error, the
    /// way the edgecore agent reports it. Known quirk, kept on purpose.
    #[error("failed to decode stored record: {source}")]
    Decode {
        partial: Box<PodStatus>,
        #[source]
        source: serde_json::Error,
    },

    #[error("pod {0} is not Ready")]
    PodNotReady(String),

    #[error("{probe} check failed: {detail}")]
    InstallProbe { probe: &'static str, detail: String },

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for edgediag
pub type Result<T> = std::result::Result<T, DiagError>;
