//! Incoming HTTP request type.

use bytes::Bytes;
use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri, Version};

/// An incoming request with its body fully buffered.
///
/// jsonwrap does not look inside the body. Parse it however you like:
/// `serde_json::from_slice(req.body())`, a form decoder, nothing at all.
#[derive(Debug)]
pub struct Request {
    parts: Parts,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes) -> Self {
        Self { parts, body }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn uri(&self) -> &Uri { &self.parts.uri }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn version(&self) -> Version { self.parts.version }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn extensions(&self) -> &Extensions { &self.parts.extensions }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Takes the raw pieces back, e.g. to hand them to another library.
    pub fn into_parts(self) -> (Parts, Bytes) {
        (self.parts, self.body)
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }
}
