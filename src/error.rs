//! Unified error type.

use crate::encode::EncodeError;

/// Boxed error produced by a request body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by jsonwrap's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as
/// [`ApiError`](crate::ApiError) values returned from handlers, not as
/// `Error`s. This type surfaces failures of the machinery around them:
/// writing to the transport, buffering a request, building a header.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The builtin internal-server-error body could not be serialized.
    /// Nothing was written to the transport.
    #[error("could not serialize the builtin error response: {0}")]
    Fallback(#[source] EncodeError),

    /// The transport failed while the body was being written. Status and
    /// headers were already committed.
    #[error("writing the response failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("reading the request body failed: {0}")]
    Body(#[source] BoxError),

    #[error("invalid header: {0}")]
    InvalidHeader(#[from] http::Error),
}
