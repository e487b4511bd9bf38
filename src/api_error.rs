//! Structured API errors.

use std::borrow::Cow;

use http::StatusCode;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::response::{Reply, Response};

/// The JSON body of every [`ApiError`].
///
/// ```json
/// {"statusCode": 404, "message": "Not found."}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    status_code: u16,
    message: Cow<'static, str>,
}

impl ErrorBody {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An error response. Returning it from a handler produces
///
/// ```json
/// {"statusCode": 406, "message": "Not acceptable."}
/// ```
///
/// with the matching HTTP status. The body is the only place the status is
/// stored, so the two cannot drift apart.
///
/// Predefined errors for every registered 4xx and 5xx code live on this type
/// as constants (see [`catalog`](crate::catalog)). Each use of a constant is
/// a fresh value, so customizing one never affects another handler:
///
/// ```rust
/// use jsonwrap::ApiError;
///
/// let err = ApiError::NOT_ACCEPTABLE.with_message("Only JSON is served here.");
/// assert_eq!(err.status_code(), 406);
/// assert_eq!(ApiError::NOT_ACCEPTABLE.message(), "Not acceptable.");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    headers: Vec<(HeaderName, HeaderValue)>,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            headers: Vec::new(),
            body: ErrorBody { status_code: status.as_u16(), message: message.into() },
        }
    }

    /// `code` must be a valid status code; only the catalog calls this.
    pub(crate) const fn from_static(code: u16, message: &'static str) -> Self {
        Self {
            headers: Vec::new(),
            body: ErrorBody { status_code: code, message: Cow::Borrowed(message) },
        }
    }

    /// Returns a copy with the same status and a different message.
    pub fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            headers: self.headers.clone(),
            body: ErrorBody { status_code: self.body.status_code, message: message.into() },
        }
    }

    /// Returns a copy with the status replaced in both the response and the
    /// body.
    pub fn with_status_code(&self, status: StatusCode) -> Self {
        Self {
            headers: self.headers.clone(),
            body: ErrorBody { status_code: status.as_u16(), message: self.body.message.clone() },
        }
    }

    /// Returns a copy with `value` appended under `name`.
    pub fn with_header(&self, name: HeaderName, value: HeaderValue) -> Self {
        let mut next = self.clone();
        next.headers.push((name, value));
        next
    }

    pub fn header(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            map.append(name.clone(), value.clone());
        }
        map
    }

    pub fn status_code(&self) -> StatusCode {
        // Codes are validated on the way in: `new` takes a `StatusCode` and the
        // catalog is checked by its tests.
        StatusCode::from_u16(self.body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message(&self) -> &str {
        self.body.message()
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl Reply for ApiError {
    type Body = ErrorBody;

    fn header(&self) -> HeaderMap {
        ApiError::header(self)
    }

    fn status_code(&self) -> StatusCode {
        ApiError::status_code(self)
    }

    fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<ApiError> for Response<ErrorBody> {
    fn from(err: ApiError) -> Self {
        let status = err.status_code();
        Response { headers: err.headers, status, body: err.body }
    }
}

#[cfg(test)]
mod tests {
    use http::header::RETRY_AFTER;

    use super::*;
    use crate::encode;

    fn json(err: &ApiError) -> String {
        String::from_utf8(encode::to_vec(err.body()).unwrap()).unwrap()
    }

    #[test]
    fn new_builds_matching_body() {
        let err = ApiError::new(StatusCode::CONFLICT, "Already taken.");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.body().status_code(), 409);
        assert_eq!(json(&err), r#"{"statusCode":409,"message":"Already taken."}"#);
    }

    #[test]
    fn with_message_keeps_status_and_original() {
        let err = ApiError::new(StatusCode::NOT_ACCEPTABLE, "Not acceptable.");
        let custom = err.with_message("Custom message.");

        assert_eq!(custom.status_code(), err.status_code());
        assert_eq!(json(&custom), r#"{"statusCode":406,"message":"Custom message."}"#);
        assert_eq!(err.message(), "Not acceptable.");
    }

    #[test]
    fn with_message_accepts_owned_strings() {
        let id = 7;
        let err = ApiError::new(StatusCode::NOT_FOUND, "Not found.")
            .with_message(format!("User {id} does not exist."));
        assert_eq!(err.message(), "User 7 does not exist.");
    }

    #[test]
    fn with_status_code_rewrites_body_too() {
        let err = ApiError::new(StatusCode::BAD_GATEWAY, "Upstream broke.")
            .with_status_code(StatusCode::GATEWAY_TIMEOUT);

        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json(&err), r#"{"statusCode":504,"message":"Upstream broke."}"#);
    }

    #[test]
    fn headers_survive_message_changes() {
        let err = ApiError::new(StatusCode::TOO_MANY_REQUESTS, "Slow down.")
            .with_header(RETRY_AFTER, HeaderValue::from_static("30"))
            .with_message("Really, slow down.");

        assert_eq!(err.header()[RETRY_AFTER], "30");
        assert_eq!(err.message(), "Really, slow down.");
    }

    #[test]
    fn converts_into_plain_response() {
        let res: Response<ErrorBody> = ApiError::new(StatusCode::GONE, "Gone.").into();
        assert_eq!(res.status_code(), StatusCode::GONE);
        assert_eq!(res.body().message(), "Gone.");
    }
}
