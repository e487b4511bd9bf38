//! Adapting a handler to hyper.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::service::Service;
use tracing::{error, warn};

use crate::api_error::ApiError;
use crate::dispatch::{self, ResponseWriter};
use crate::error::{BoxError, Error};
use crate::handler::{BoxFuture, BoxedHandler, Handler, Outcome};
use crate::request::Request;

/// Turns a handler into a hyper [`Service`].
///
/// jsonwrap does not accept connections. Run hyper (or anything built on
/// it) yourself and hand it the wrapped handler:
///
/// ```rust,no_run
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use jsonwrap::{Request, Response, wrap};
///
/// async fn hello(_req: Request) -> Response<&'static str> {
///     Response::new("hello")
/// }
///
/// # async fn run(stream: tokio::net::TcpStream) {
/// Builder::new(TokioExecutor::new())
///     .serve_connection(TokioIo::new(stream), wrap(hello))
///     .await
///     .ok();
/// # }
/// ```
pub fn wrap(handler: impl Handler) -> Wrapped {
    Wrapped {
        handler: handler.into_boxed_handler(),
        body_limit: Wrapped::DEFAULT_BODY_LIMIT,
    }
}

/// A handler wrapped as a hyper service. Cheap to clone.
#[derive(Clone)]
pub struct Wrapped {
    handler: BoxedHandler,
    body_limit: usize,
}

impl Wrapped {
    /// Request bodies larger than this are refused unless
    /// [`body_limit`](Self::body_limit) says otherwise. 2 MiB.
    pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

    /// Caps how many body bytes are buffered per request. A larger body is
    /// answered with [`ApiError::REQUEST_ENTITY_TOO_LARGE`] and the handler
    /// is not called.
    pub fn body_limit(self, limit: usize) -> Self {
        Self { body_limit: limit, ..self }
    }
}

impl<B> Service<http::Request<B>> for Wrapped
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = Error;
    type Future = BoxFuture<Outcome>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let limit = self.body_limit;
        Box::pin(async move {
            let outcome = handle(handler, limit, req).await;
            if let Err(e) = &outcome {
                error!("jsonwrap was unable to handle the request: {e}");
            }
            outcome
        })
    }
}

async fn handle<B>(handler: BoxedHandler, limit: usize, req: http::Request<B>) -> Outcome
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let (parts, body) = req.into_parts();
    let body = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!(limit, path = %parts.uri.path(), "request body exceeds the limit");
            let mut writer = ResponseWriter::new();
            dispatch::call(&ApiError::REQUEST_ENTITY_TOO_LARGE, &mut writer)?;
            return Ok(writer.into_response());
        }
        Err(e) => return Err(Error::Body(e)),
    };
    handler.call(Request::new(parts, body)).await
}
