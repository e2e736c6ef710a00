use thiserror::Error;

/// Top-level error type for the `voxilo-api` crate.
///
/// Covers the two failure families this layer owns -- client-side
/// precondition checks and response-shape mismatches -- plus the pass-through
/// variant for failures raised by the injected transport.
#[derive(Debug, Error)]
pub enum Error {
    // ── Preconditions (raised before any network call) ──────────────
    /// Client-side validation failed.
    #[error("invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// An operation that needs an entity identifier was invoked without one.
    #[error("`{field}` must be set")]
    MissingId { field: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// Failure raised by the injected transport: connection, TLS, HTTP
    /// status, or a remote API error envelope. Propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    // ── Data ────────────────────────────────────────────────────────
    /// The response body did not have the expected shape, with the raw
    /// body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Wrap an arbitrary error as a transport failure.
    ///
    /// Convenience for `Transport` implementations built on clients with
    /// their own error types.
    pub fn transport<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(source))
    }

    /// Returns `true` if this error was raised before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::MissingId { .. })
    }

    /// Returns `true` if this error came from the injected transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
