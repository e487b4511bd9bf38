//! Outgoing response value and the [`Reply`] capability trait.
//!
//! A handler builds a [`Response`] and returns it. It never touches the
//! transport: serialization and writing happen afterwards, in
//! [`dispatch`](crate::dispatch).

use http::StatusCode;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::Error;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing response whose body will be serialized as JSON.
///
/// `Response` is immutable. Every `with_*` method borrows `self` and returns
/// a new value with its own copy of the headers, so a response can be kept
/// around and specialized many times:
///
/// ```rust
/// use http::StatusCode;
/// use http::header::{HeaderValue, LOCATION};
/// use jsonwrap::Response;
///
/// let created = Response::new(serde_json::json!({ "id": 42 }))
///     .with_status_code(StatusCode::CREATED);
/// let located = created.with_header(LOCATION, HeaderValue::from_static("/users/42"));
///
/// assert!(created.header().is_empty());
/// assert_eq!(located.header()[LOCATION], "/users/42");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T> {
    pub(crate) headers: Vec<(HeaderName, HeaderValue)>,
    pub(crate) status: StatusCode,
    pub(crate) body: T,
}

impl<T> Response<T> {
    /// `200 OK` with no headers.
    pub const fn new(body: T) -> Self {
        Self { headers: Vec::new(), status: StatusCode::OK, body }
    }

    /// A copy of the headers. Repeated names keep every value, in the order
    /// they were added.
    pub fn header(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            map.append(name.clone(), value.clone());
        }
        map
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

impl<T: Clone> Response<T> {
    /// Returns a copy with the status replaced.
    pub fn with_status_code(&self, status: StatusCode) -> Self {
        Self { status, ..self.clone() }
    }

    /// Returns a copy with `value` appended under `name`.
    ///
    /// Adding the same name twice keeps both values and produces two header
    /// lines on the wire.
    pub fn with_header(&self, name: HeaderName, value: HeaderValue) -> Self {
        let mut next = self.clone();
        next.headers.push((name, value));
        next
    }

    /// Like [`with_header`](Self::with_header), for names and values only
    /// known at runtime.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHeader`] if `name` is not a valid header name or
    /// `value` contains bytes not allowed in a header value.
    pub fn try_with_header(&self, name: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::try_from(name).map_err(http::Error::from)?;
        let value = HeaderValue::try_from(value).map_err(http::Error::from)?;
        Ok(self.with_header(name, value))
    }
}

// ── Reply ─────────────────────────────────────────────────────────────────────

/// Anything the dispatch pipeline knows how to send.
///
/// [`Response`] and [`ApiError`](crate::ApiError) implement it. Implement it
/// on your own types to return them directly from handlers:
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use jsonwrap::Reply;
///
/// struct Pong;
///
/// impl Reply for Pong {
///     type Body = &'static str;
///
///     fn header(&self) -> HeaderMap { HeaderMap::new() }
///     fn status_code(&self) -> StatusCode { StatusCode::OK }
///     fn body(&self) -> &&'static str { &"pong" }
/// }
/// ```
pub trait Reply {
    type Body: Serialize + ?Sized;

    fn header(&self) -> HeaderMap;
    fn status_code(&self) -> StatusCode;
    fn body(&self) -> &Self::Body;
}

impl<T: Serialize> Reply for Response<T> {
    type Body = T;

    fn header(&self) -> HeaderMap {
        Response::header(self)
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn body(&self) -> &T {
        &self.body
    }
}
