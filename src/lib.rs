//! # jsonwrap
//!
//! Return a value from your handler. Get consistent JSON on the wire.
//!
//! A handler never writes to the response stream. It returns a [`Response`]
//! (or an [`ApiError`], or anything else implementing [`Reply`]) and jsonwrap
//! turns that value into exactly one write: headers, status, JSON body.
//!
//! - The body is serialized with serde. If it cannot be represented as JSON
//!   (a `NaN`, a map with non-string keys), the client gets
//!   `500 {"statusCode":500,"message":"Internal server error."}` instead.
//! - `Content-Type: application/json` is set unless the handler set its own.
//! - Headers added more than once become separate header lines.
//!
//! What jsonwrap does not do: routing, request-body parsing, authentication,
//! middleware, accepting connections. Put a router in front of it or inside
//! your handler, and run hyper yourself.
//!
//! Request bodies are buffered up to [`Wrapped::DEFAULT_BODY_LIMIT`]; larger
//! ones get `413` without reaching the handler.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use http::header::{HeaderValue, LOCATION};
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use jsonwrap::{ApiError, Request, Response, wrap};
//! use serde::Serialize;
//! use tokio::net::TcpListener;
//!
//! #[derive(Clone, Serialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("0.0.0.0:3000").await?;
//!     let service = wrap(create_user);
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let service = service.clone();
//!         tokio::spawn(async move {
//!             Builder::new(TokioExecutor::new())
//!                 .serve_connection(TokioIo::new(stream), service)
//!                 .await
//!                 .ok();
//!         });
//!     }
//! }
//!
//! async fn create_user(req: Request) -> Result<Response<User>, ApiError> {
//!     if req.body().is_empty() {
//!         return Err(ApiError::BAD_REQUEST.with_message("Body is required."));
//!     }
//!     let user = User { id: 99, name: "new_user".into() };
//!     Ok(Response::new(user)
//!         .with_status_code(StatusCode::CREATED)
//!         .with_header(LOCATION, HeaderValue::from_static("/users/99")))
//! }
//! ```

mod api_error;
mod encode;
mod error;
mod handler;
mod request;
mod response;
mod service;

pub mod catalog;
pub mod dispatch;

pub use api_error::{ApiError, ErrorBody};
pub use dispatch::HandlerOutput;
pub use encode::EncodeError;
pub use error::{BoxError, Error};
pub use handler::Handler;
pub use request::Request;
pub use response::{Reply, Response};
pub use service::{Wrapped, wrap};
