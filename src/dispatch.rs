//! The dispatch pipeline: one [`Reply`] in, one write to the transport out.
//!
//! ```text
//! handler(req) ─► reply ─► encode body ──ok──► headers ─► status ─► body
//!                              │
//!                              └─err─► ApiError::INTERNAL_SERVER_ERROR ─► …
//! ```
//!
//! The pipeline is synchronous. By the time [`call`] runs the handler has
//! already produced its value; nothing here awaits.

use bytes::Bytes;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use http_body_util::Full;
use tracing::{debug, warn};

use crate::api_error::ApiError;
use crate::encode;
use crate::error::Error;
use crate::response::Reply;

// ── Transport ─────────────────────────────────────────────────────────────────

/// The sink a reply is written into.
///
/// [`call`] uses it in a fixed order: header mutations, then exactly one
/// [`write_status`](Transport::write_status), then exactly one
/// [`write_body`](Transport::write_body).
pub trait Transport {
    fn headers_mut(&mut self) -> &mut HeaderMap;
    fn write_status(&mut self, status: StatusCode);
    fn write_body(&mut self, body: Bytes) -> std::io::Result<()>;
}

/// Serializes `reply` and writes it to `transport`.
///
/// A body that cannot be encoded as JSON is replaced, together with the
/// reply's status and headers, by [`ApiError::INTERNAL_SERVER_ERROR`].
///
/// # Errors
///
/// - [`Error::Fallback`] if even the fallback body fails to encode. Nothing
///   was written.
/// - [`Error::Write`] if the transport rejected the body. Status and headers
///   were already written.
pub fn call<R, W>(reply: &R, transport: &mut W) -> Result<(), Error>
where
    R: Reply + ?Sized,
    W: Transport + ?Sized,
{
    let (status, headers, body) = match encode::to_vec(reply.body()) {
        Ok(body) => (reply.status_code(), reply.header(), body),
        Err(e) => {
            warn!(
                status = %reply.status_code(),
                error = %e,
                "response body is not representable as JSON, sending internal server error"
            );
            let fallback = ApiError::INTERNAL_SERVER_ERROR;
            let body = encode::to_vec(fallback.body()).map_err(Error::Fallback)?;
            (fallback.status_code(), fallback.header(), body)
        }
    };

    let out = transport.headers_mut();
    for (name, value) in &headers {
        out.append(name.clone(), value.clone());
    }
    default_content_type(out);

    debug!(status = %status, bytes = body.len(), "writing response");
    transport.write_status(status);
    transport.write_body(Bytes::from(body)).map_err(Error::Write)
}

/// Sets `Content-Type: application/json` unless some non-empty value is
/// already present. Empty values never reach the wire.
fn default_content_type(headers: &mut HeaderMap) {
    if !headers.get_all(CONTENT_TYPE).iter().any(HeaderValue::is_empty) {
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        return;
    }

    let kept: Vec<HeaderValue> = headers
        .get_all(CONTENT_TYPE)
        .iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();
    headers.remove(CONTENT_TYPE);
    if kept.is_empty() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    for value in kept {
        headers.append(CONTENT_TYPE, value);
    }
}

// ── HandlerOutput ─────────────────────────────────────────────────────────────

/// What a handler may return: any [`Reply`], or a `Result` whose both sides
/// are replies, so handlers can use `?` with [`ApiError`].
///
/// ```rust
/// use jsonwrap::{ApiError, Request, Response};
///
/// async fn get_user(req: Request) -> Result<Response<String>, ApiError> {
///     let id = req.path().strip_prefix("/users/").ok_or(ApiError::NOT_FOUND)?;
///     Ok(Response::new(id.to_owned()))
/// }
/// ```
pub trait HandlerOutput: Send + 'static {
    fn dispatch<W: Transport + ?Sized>(&self, transport: &mut W) -> Result<(), Error>;
}

impl<R: Reply + Send + 'static> HandlerOutput for R {
    fn dispatch<W: Transport + ?Sized>(&self, transport: &mut W) -> Result<(), Error> {
        call(self, transport)
    }
}

impl<A, B> HandlerOutput for Result<A, B>
where
    A: Reply + Send + 'static,
    B: Reply + Send + 'static,
{
    fn dispatch<W: Transport + ?Sized>(&self, transport: &mut W) -> Result<(), Error> {
        match self {
            Ok(reply) => call(reply, transport),
            Err(reply) => call(reply, transport),
        }
    }
}

// ── ResponseWriter ────────────────────────────────────────────────────────────

/// A [`Transport`] that assembles an `http::Response` for hyper.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: Option<Bytes>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the exchange. A writer nobody wrote to yields an empty
    /// `200 OK`.
    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body.unwrap_or_default()));
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = self.headers;
        res
    }
}

impl Transport for ResponseWriter {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(written) => warn!(%written, ignored = %status, "superfluous status write"),
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, body: Bytes) -> std::io::Result<()> {
        if self.body.is_some() {
            return Err(std::io::Error::other("response body already written"));
        }
        self.status.get_or_insert(StatusCode::OK);
        self.body = Some(body);
        Ok(())
    }
}
