//! Unified error type.

/// The error type returned by scribe's fallible infrastructure operations.
///
/// Application-level outcomes (invalid params, missing article, etc.) are
/// expressed as [`Code`](crate::Code) values inside an
/// [`Envelope`](crate::Envelope), not as `Error`s. This type surfaces startup
/// and transport failures: reading config, binding to a port, accepting a
/// connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    Addr(String),

    #[error("config `{path}`: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config: {0}")]
    Config(String),
}
